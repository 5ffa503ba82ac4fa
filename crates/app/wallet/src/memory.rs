//! In-memory wallet provider backed by local keys.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use sigpad_eth::{LocalKeySigner, SignerError};

use crate::error::{codes, WalletError};
use crate::provider::WalletProvider;

/// Answers `eth_requestAccounts`, `eth_accounts` and `personal_sign` from
/// local keys, the way a browser extension would after the user approves.
///
/// Approval can be switched off to simulate the user dismissing the prompt.
#[derive(Debug)]
pub struct InMemoryWallet {
    accounts: Vec<LocalKeySigner>,
    rejecting: AtomicBool,
    requests: AtomicUsize,
}

impl InMemoryWallet {
    pub fn new(accounts: Vec<LocalKeySigner>) -> Self {
        Self {
            accounts,
            rejecting: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn from_private_keys<I, S>(keys: I) -> Result<Self, SignerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accounts = keys
            .into_iter()
            .map(|k| LocalKeySigner::from_hex(k.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(accounts))
    }

    /// When set, prompts (`eth_requestAccounts`, `personal_sign`) fail with code 4001.
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn addresses(&self) -> Vec<String> {
        self.accounts
            .iter()
            .map(|a| a.address().to_checksum(None))
            .collect()
    }

    fn check_prompt(&self) -> Result<(), WalletError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(WalletError::user_rejected());
        }
        Ok(())
    }

    fn personal_sign_params(params: &Value) -> Result<(&str, &str), WalletError> {
        let invalid = || {
            WalletError::rpc(
                codes::INVALID_PARAMS,
                "personal_sign expects [message, address]",
            )
        };
        let message = params.get(0).and_then(Value::as_str).ok_or_else(invalid)?;
        let address = params.get(1).and_then(Value::as_str).ok_or_else(invalid)?;
        Ok((message, address))
    }
}

#[async_trait]
impl WalletProvider for InMemoryWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        match method {
            "eth_accounts" => Ok(json!(self.addresses())),
            "eth_requestAccounts" => {
                self.check_prompt()?;
                Ok(json!(self.addresses()))
            }
            "personal_sign" => {
                self.check_prompt()?;
                let (message, address) = Self::personal_sign_params(&params)?;
                let signer = self
                    .accounts
                    .iter()
                    .find(|a| a.address().to_checksum(None).eq_ignore_ascii_case(address))
                    .ok_or_else(|| {
                        WalletError::rpc(
                            codes::UNAUTHORIZED,
                            "The requested account has not been authorized by the user.",
                        )
                    })?;
                let signed = signer
                    .sign_message_sync(message)
                    .map_err(|e| WalletError::rpc(codes::INTERNAL_ERROR, e.to_string()))?;
                Ok(json!(signed.signature))
            }
            other => Err(WalletError::rpc(
                codes::UNSUPPORTED_METHOD,
                format!("The requested method is not supported: {other}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

    fn wallet() -> InMemoryWallet {
        InMemoryWallet::from_private_keys([KEY]).unwrap()
    }

    #[tokio::test]
    async fn test_request_accounts_returns_checksummed_addresses() {
        let accounts = wallet().request_accounts().await.unwrap();
        assert_eq!(accounts, vec![ADDRESS.to_string()]);
    }

    #[tokio::test]
    async fn test_personal_sign_accepts_lowercase_address() {
        let sig = wallet()
            .personal_sign("Some data", &ADDRESS.to_lowercase())
            .await
            .unwrap();
        assert!(sig.ends_with("1c"));
    }

    #[tokio::test]
    async fn test_personal_sign_unknown_account() {
        let other = format!("0x{}", "11".repeat(20));
        let err = wallet().personal_sign("hi", &other).await.unwrap_err();
        assert!(matches!(err, WalletError::Rpc { code, .. } if code == codes::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_rejecting_wallet() {
        let wallet = wallet();
        wallet.set_rejecting(true);

        let err = wallet.request_accounts().await.unwrap_err();
        assert!(err.is_user_rejection());

        // Reading already-exposed accounts does not prompt.
        let accounts = wallet.request("eth_accounts", json!([])).await.unwrap();
        assert_eq!(accounts, json!([ADDRESS]));
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let err = wallet()
            .request("eth_sendTransaction", json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::Rpc { code, .. } if code == codes::UNSUPPORTED_METHOD));
    }

    #[tokio::test]
    async fn test_bad_personal_sign_params() {
        let err = wallet()
            .request("personal_sign", json!(["only-message"]))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::Rpc { code, .. } if code == codes::INVALID_PARAMS));
    }

    #[tokio::test]
    async fn test_request_count() {
        let wallet = wallet();
        wallet.request_accounts().await.unwrap();
        wallet.personal_sign("x", ADDRESS).await.unwrap();
        assert_eq!(wallet.request_count(), 2);
    }
}

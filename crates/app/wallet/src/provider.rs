use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::WalletError;

/// An EIP-1193 style provider: one generic `request` entry point.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Issue a raw provider request.
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;

    /// `eth_requestAccounts`: ask the wallet to expose its accounts.
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        let result = self.request("eth_requestAccounts", json!([])).await?;
        serde_json::from_value(result)
            .map_err(|e| WalletError::InvalidResponse(format!("eth_requestAccounts: {e}")))
    }

    /// `personal_sign`: sign `message` with `address`. Params are `[message, address]`.
    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, WalletError> {
        let result = self
            .request("personal_sign", json!([message, address]))
            .await?;
        result.as_str().map(ToOwned::to_owned).ok_or_else(|| {
            WalletError::InvalidResponse(format!("personal_sign returned non-string: {result}"))
        })
    }
}

//! Signing through a wallet provider.

use std::sync::Arc;

use async_trait::async_trait;
use sigpad_eth::{MessageSigner, SignedMessage, SignerError};

use crate::error::WalletError;
use crate::provider::WalletProvider;

/// [`MessageSigner`] that asks a wallet provider to sign.
///
/// Each call requests account access and signs with the first account the
/// wallet returns.
#[derive(Clone)]
pub struct ExtensionSigner {
    provider: Arc<dyn WalletProvider>,
}

impl ExtensionSigner {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl MessageSigner for ExtensionSigner {
    async fn sign_message(&self, message: &str) -> Result<SignedMessage, SignerError> {
        let accounts = self.provider.request_accounts().await?;
        let address = accounts.into_iter().next().ok_or(WalletError::NoAccounts)?;
        tracing::debug!(%address, "wallet exposed account, requesting personal_sign");

        let signature = self.provider.personal_sign(message, &address).await?;
        Ok(SignedMessage { signature, address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryWallet;

    #[tokio::test]
    async fn test_empty_wallet_is_provider_error() {
        let signer = ExtensionSigner::new(Arc::new(InMemoryWallet::new(Vec::new())));
        let err = signer.sign_message("hello").await.unwrap_err();
        assert_eq!(
            err,
            SignerError::Provider {
                code: None,
                message: "wallet returned no accounts".to_string(),
            }
        );
    }
}

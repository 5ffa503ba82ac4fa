//! Injected signing and verification capabilities.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sigpad_eth::{
    validate_private_key_format, Eip191Verifier, KeyDerivation, MessageSigner, Secp256k1Keys,
    SignatureVerifier, SignerError,
};
use sigpad_wallet::{ExtensionSigner, WalletProvider};

use crate::error::ValidationError;
use crate::types::{SignMethod, SigningRequest};

/// Pause between local validation and delegation, in the interactive surface.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Everything the workflow calls out to.
///
/// The wallet is optional; without one the extension method fails validation
/// with "Wallet extension not detected.".
#[derive(Clone)]
pub struct Capabilities {
    keys: Arc<dyn KeyDerivation>,
    wallet: Option<Arc<dyn WalletProvider>>,
    verifier: Arc<dyn SignatureVerifier>,
    settle_delay: Duration,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("wallet", &self.wallet.is_some())
            .field("settle_delay", &self.settle_delay)
            .finish_non_exhaustive()
    }
}

/// Where a validated request will be signed.
pub(crate) enum SigningRoute {
    LocalKey(String),
    Extension(Arc<dyn WalletProvider>),
}

impl Capabilities {
    /// secp256k1 keys and EIP-191 verification, no wallet, no settle delay.
    pub fn new() -> Self {
        Self {
            keys: Arc::new(Secp256k1Keys),
            wallet: None,
            verifier: Arc::new(Eip191Verifier),
            settle_delay: Duration::ZERO,
        }
    }

    pub fn with_keys(mut self, keys: Arc<dyn KeyDerivation>) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn SignatureVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn verifier(&self) -> &dyn SignatureVerifier {
        self.verifier.as_ref()
    }

    /// Local checks for `request`. Calls no capability.
    pub(crate) fn route(&self, request: &SigningRequest) -> Result<SigningRoute, ValidationError> {
        match request.method {
            SignMethod::PrivateKey => {
                let key = request.private_key.as_deref().unwrap_or_default();
                validate_private_key_format(key)?;
                Ok(SigningRoute::LocalKey(key.to_string()))
            }
            SignMethod::Extension => self
                .wallet
                .clone()
                .map(SigningRoute::Extension)
                .ok_or(ValidationError::ExtensionUnavailable),
        }
    }

    pub(crate) fn signer_for(
        &self,
        route: SigningRoute,
    ) -> Result<Arc<dyn MessageSigner>, SignerError> {
        match route {
            SigningRoute::LocalKey(key) => self.keys.derive_signer(&key),
            SigningRoute::Extension(wallet) => Ok(Arc::new(ExtensionSigner::new(wallet))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigpad_eth::KeyFormatError;
    use sigpad_wallet::InMemoryWallet;

    fn request(method: SignMethod, key: Option<&str>) -> SigningRequest {
        SigningRequest {
            message: "hello".into(),
            method,
            private_key: key.map(str::to_string),
        }
    }

    #[test]
    fn test_route_rejects_short_key() {
        let caps = Capabilities::new();
        let err = caps
            .route(&request(SignMethod::PrivateKey, Some("0x1234")))
            .err()
            .unwrap();
        assert_eq!(err, ValidationError::KeyFormat(KeyFormatError::Shape));
    }

    #[test]
    fn test_route_extension_requires_wallet() {
        let caps = Capabilities::new();
        let err = caps.route(&request(SignMethod::Extension, None)).err().unwrap();
        assert_eq!(err, ValidationError::ExtensionUnavailable);
        assert_eq!(err.to_string(), "Wallet extension not detected.");

        let caps = caps.with_wallet(Arc::new(InMemoryWallet::new(Vec::new())));
        assert!(matches!(
            caps.route(&request(SignMethod::Extension, None)),
            Ok(SigningRoute::Extension(_))
        ));
    }

    #[test]
    fn test_debug_hides_capabilities() {
        let caps = Capabilities::new().with_settle_delay(DEFAULT_SETTLE_DELAY);
        let rendered = format!("{caps:?}");
        assert!(rendered.contains("settle_delay"));
        assert!(rendered.contains("wallet: false"));
    }
}

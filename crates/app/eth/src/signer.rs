//! Signing capabilities.

use std::fmt;
use std::sync::Arc;

use alloy_primitives::{Address, PrimitiveSignature, U256};
use async_trait::async_trait;
use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey};

use crate::eip191::hash_personal_message;
use crate::error::SignerError;
use crate::key::{address_of, parse_signing_key};
use crate::signature::encode_signature;

/// Result of a successful signing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// `0x`-prefixed 65-byte signature.
    pub signature: String,
    /// Address of the signer as reported by the capability.
    pub address: String,
}

/// Something that can sign a UTF-8 message as an EIP-191 personal message.
#[async_trait]
pub trait MessageSigner: Send + Sync {
    async fn sign_message(&self, message: &str) -> Result<SignedMessage, SignerError>;
}

/// Turns a raw private key into a [`MessageSigner`].
pub trait KeyDerivation: Send + Sync {
    /// Derive a signer identity from `private_key_hex`.
    ///
    /// Callers are expected to have run the format check already; this still
    /// fails for keys that are not valid secp256k1 scalars.
    fn derive_signer(&self, private_key_hex: &str) -> Result<Arc<dyn MessageSigner>, SignerError>;
}

/// The secp256k1 key derivation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Keys;

impl KeyDerivation for Secp256k1Keys {
    fn derive_signer(&self, private_key_hex: &str) -> Result<Arc<dyn MessageSigner>, SignerError> {
        Ok(Arc::new(LocalKeySigner::from_hex(private_key_hex)?))
    }
}

/// Signs with an in-process secp256k1 key.
pub struct LocalKeySigner {
    signing_key: SigningKey,
    address: Address,
}

impl LocalKeySigner {
    pub fn new(signing_key: SigningKey) -> Self {
        let address = address_of(&signing_key);
        Self {
            signing_key,
            address,
        }
    }

    pub fn from_hex(private_key_hex: &str) -> Result<Self, SignerError> {
        parse_signing_key(private_key_hex).map(Self::new)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign without going through the async trait.
    pub fn sign_message_sync(&self, message: &str) -> Result<SignedMessage, SignerError> {
        let hash = hash_personal_message(message);
        let (sig, recovery_id): (k256::ecdsa::Signature, k256::ecdsa::RecoveryId) = self
            .signing_key
            .sign_prehash(hash.as_ref())
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        let r = U256::from_be_slice(&sig.r().to_bytes());
        let s = U256::from_be_slice(&sig.s().to_bytes());
        let signature = PrimitiveSignature::new(r, s, recovery_id.is_y_odd());

        Ok(SignedMessage {
            signature: encode_signature(&signature),
            address: self.address.to_checksum(None),
        })
    }
}

impl fmt::Debug for LocalKeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeySigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MessageSigner for LocalKeySigner {
    async fn sign_message(&self, message: &str) -> Result<SignedMessage, SignerError> {
        self.sign_message_sync(message)
    }
}

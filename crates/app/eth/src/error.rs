//! Signing and verification error types.

use thiserror::Error;

/// Numeric codes for verification failures.
///
/// A verification either returns a boolean (match / mismatch) or fails with
/// one of these codes. Only inputs that cannot be interpreted as an address or
/// a recoverable signature produce a code; a well-formed signature from a
/// different signer is a mismatch, never an error.
pub mod codes {
    /// Address is not 20-byte hex, or carries a bad EIP-55 checksum.
    pub const INVALID_ADDRESS: u16 = 0x20;
    /// Signature is missing the `0x` prefix or contains non-hex characters.
    pub const INVALID_SIGNATURE_HEX: u16 = 0x21;
    /// Signature does not decode to exactly 65 bytes.
    pub const INVALID_SIGNATURE_LENGTH: u16 = 0x22;
    /// Recovery byte is not one of 0, 1, 27, 28.
    pub const INVALID_RECOVERY_ID: u16 = 0x23;
    /// r/s out of range, or no public key recovers from the signature.
    pub const SIGNATURE_RECOVERY: u16 = 0x24;
}

/// Private key text that fails the local format check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFormatError {
    #[error("Private Key must start with 0x and be 66 characters long.")]
    Shape,

    #[error("Private Key must contain only hexadecimal characters.")]
    NotHex,
}

/// Errors raised by a signing capability.
///
/// The `Display` text is what the user sees, so provider errors carry the
/// provider's own message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// Key bytes are not a valid secp256k1 scalar.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// The ECDSA signing operation itself failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A wallet provider refused or failed the request.
    #[error("{message}")]
    Provider { code: Option<i64>, message: String },
}

/// Errors raised by the verification capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("signature must be 0x-prefixed hex")]
    InvalidSignatureHex,

    #[error("signature must be 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("invalid signature recovery byte {0}")]
    InvalidRecoveryId(u8),

    #[error("failed to recover signer from signature")]
    Recovery,
}

impl VerifyError {
    /// Stable numeric code for this failure, see [`codes`].
    pub fn code(&self) -> u16 {
        match self {
            VerifyError::InvalidAddress(_) => codes::INVALID_ADDRESS,
            VerifyError::InvalidSignatureHex => codes::INVALID_SIGNATURE_HEX,
            VerifyError::InvalidSignatureLength(_) => codes::INVALID_SIGNATURE_LENGTH,
            VerifyError::InvalidRecoveryId(_) => codes::INVALID_RECOVERY_ID,
            VerifyError::Recovery => codes::SIGNATURE_RECOVERY,
        }
    }
}

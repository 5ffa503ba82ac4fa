//! Ethereum personal message signing and verification for sigpad.
//!
//! This crate provides the cryptographic capabilities the sign/verify workflow
//! delegates to. Nothing here keeps state between calls.
//!
//! # Message Format
//!
//! Messages are signed as EIP-191 personal messages:
//! `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`.
//! Signatures are 65 bytes (`r || s || v`) and hex encoded with a `0x` prefix.
//!
//! # Usage
//!
//! ```text
//! use sigpad_eth::{Eip191Verifier, KeyDerivation, Secp256k1Keys, SignatureVerifier};
//!
//! let signer = Secp256k1Keys.derive_signer("0x4c08...2318")?;
//! let signed = signer.sign_message("Some data").await?;
//!
//! let ok = Eip191Verifier.verify_signature(&signed.address, "Some data", &signed.signature)?;
//! assert!(ok);
//! ```
//!
//! # Architecture
//!
//! 1. [`MessageSigner`] - anything that can produce a personal-message signature
//! 2. [`KeyDerivation`] - turns a raw private key into a [`MessageSigner`]
//! 3. [`SignatureVerifier`] - checks an (address, message, signature) triple

pub mod eip191;
pub mod error;
pub mod key;
pub mod recovery;
pub mod signature;
pub mod signer;
pub mod verifier;

pub use eip191::hash_personal_message;
pub use error::{codes, KeyFormatError, SignerError, VerifyError};
pub use key::{address_of, parse_signing_key, validate_private_key_format, PRIVATE_KEY_HEX_LEN};
pub use recovery::recover_signer;
pub use signature::{decode_signature, encode_signature, SIGNATURE_LEN};
pub use signer::{KeyDerivation, LocalKeySigner, MessageSigner, Secp256k1Keys, SignedMessage};
pub use verifier::{parse_address, Eip191Verifier, SignatureVerifier};

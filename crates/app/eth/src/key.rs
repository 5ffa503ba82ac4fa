//! Private key parsing and address derivation.

use alloy_primitives::{keccak256, Address};
use k256::ecdsa::{SigningKey, VerifyingKey};

use crate::error::{KeyFormatError, SignerError};

/// Length of a `0x`-prefixed 32-byte private key.
pub const PRIVATE_KEY_HEX_LEN: usize = 66;

/// Check that `input` looks like `0x` followed by 64 hex digits.
///
/// This is a shape check only. A key that passes can still be rejected by
/// [`parse_signing_key`] when it is zero or not below the curve order.
pub fn validate_private_key_format(input: &str) -> Result<(), KeyFormatError> {
    let Some(digits) = input.strip_prefix("0x") else {
        return Err(KeyFormatError::Shape);
    };
    if input.len() != PRIVATE_KEY_HEX_LEN {
        return Err(KeyFormatError::Shape);
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(KeyFormatError::NotHex);
    }
    Ok(())
}

/// Parse a hex private key (with or without `0x`) into a signing key.
pub fn parse_signing_key(input: &str) -> Result<SigningKey, SignerError> {
    let trimmed = input.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let decoded = hex::decode(hex_str)
        .map_err(|e| SignerError::InvalidKey(format!("invalid private key hex: {e}")))?;
    let bytes: [u8; 32] = decoded
        .try_into()
        .map_err(|_| SignerError::InvalidKey("private key must be 32 bytes".to_string()))?;
    SigningKey::from_bytes((&bytes).into()).map_err(|e| SignerError::InvalidKey(e.to_string()))
}

/// Ethereum address of a signing key: last 20 bytes of keccak256(uncompressed pubkey).
pub fn address_of(signing_key: &SigningKey) -> Address {
    let verifying_key = VerifyingKey::from(signing_key);
    let public_key = verifying_key.to_encoded_point(false);
    let coordinates = public_key
        .as_bytes()
        .split_first()
        .map_or(&[][..], |(_tag, rest)| rest);
    Address::from_word(keccak256(coordinates))
}

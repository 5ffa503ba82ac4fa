//! Signature verification for personal messages.

use std::str::FromStr;

use alloy_primitives::Address;

use crate::eip191::hash_personal_message;
use crate::error::VerifyError;
use crate::recovery::recover_signer;
use crate::signature::decode_signature;

/// Checks whether a signature over a message was produced by an address.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `Ok(true)` if `signature` over `message` recovers to `address`,
    /// `Ok(false)` if it recovers to a different address, and an error if any
    /// input cannot be interpreted.
    fn verify_signature(
        &self,
        address: &str,
        message: &str,
        signature: &str,
    ) -> Result<bool, VerifyError>;
}

/// EIP-191 personal message verifier backed by secp256k1 recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip191Verifier;

impl SignatureVerifier for Eip191Verifier {
    fn verify_signature(
        &self,
        address: &str,
        message: &str,
        signature: &str,
    ) -> Result<bool, VerifyError> {
        let expected = parse_address(address)?;
        let signature = decode_signature(signature)?;
        let recovered = recover_signer(hash_personal_message(message), &signature)?;

        tracing::debug!(%expected, %recovered, "recovered personal message signer");
        Ok(recovered == expected)
    }
}

/// Parse a `0x`-prefixed 20-byte hex address.
///
/// All-lowercase and all-uppercase addresses are accepted as-is; mixed-case
/// input must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, VerifyError> {
    let invalid = || VerifyError::InvalidAddress(input.to_string());

    let hex_str = input.strip_prefix("0x").ok_or_else(invalid)?;
    if hex_str.len() != 40 || !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let has_lower = hex_str.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex_str.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(input, None).map_err(|_| invalid())
    } else {
        Address::from_str(input).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    const ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
    const SIGNATURE: &str = "0xb91467e570a6466aa9e9876cbcd013baba02900b8979d43fe208a4a4f339f5fd\
                             6007e74cd82e037b800186422fc2da167c747ef045e5d18a5f5d4300f8e1a0291c";

    #[test]
    fn test_known_signature_matches() {
        assert_eq!(
            Eip191Verifier.verify_signature(ADDRESS, "Some data", SIGNATURE),
            Ok(true)
        );
    }

    #[test]
    fn test_lowercase_address_matches() {
        let lower = ADDRESS.to_lowercase();
        assert_eq!(
            Eip191Verifier.verify_signature(&lower, "Some data", SIGNATURE),
            Ok(true)
        );
    }

    #[test]
    fn test_other_message_is_mismatch() {
        assert_eq!(
            Eip191Verifier.verify_signature(ADDRESS, "Some data!", SIGNATURE),
            Ok(false)
        );
    }

    #[test]
    fn test_other_address_is_mismatch() {
        let other = format!("0x{}", "ab".repeat(20));
        assert_eq!(
            Eip191Verifier.verify_signature(&other, "Some data", SIGNATURE),
            Ok(false)
        );
    }

    #[test]
    fn test_not_hex_address_is_error() {
        let err = Eip191Verifier
            .verify_signature("not-hex", "hi", "0xdead")
            .unwrap_err();
        assert_eq!(err.code(), codes::INVALID_ADDRESS);
    }

    #[test]
    fn test_bad_checksum_is_error() {
        // Flip the case of one letter in a checksummed address.
        let bad = ADDRESS.replacen("E3", "e3", 1);
        assert!(matches!(
            parse_address(&bad),
            Err(VerifyError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_short_signature_is_error() {
        let err = Eip191Verifier
            .verify_signature(ADDRESS, "Some data", "0xdead")
            .unwrap_err();
        assert_eq!(err.code(), codes::INVALID_SIGNATURE_LENGTH);
    }

    #[test]
    fn test_parse_address_requires_prefix() {
        assert!(parse_address(&ADDRESS[2..]).is_err());
        assert!(parse_address("0x1234").is_err());
    }
}

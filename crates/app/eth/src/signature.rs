//! Hex codec for 65-byte `r || s || v` signatures.

use alloy_primitives::{PrimitiveSignature, U256};

use crate::error::VerifyError;

/// Length in bytes of an encoded signature.
pub const SIGNATURE_LEN: usize = 65;

/// Encode a signature as `0x` + hex(r || s || v) with `v = 27 + y_parity`.
pub fn encode_signature(signature: &PrimitiveSignature) -> String {
    let v = 27 + u8::from(signature.v());
    let bytes = [
        signature.r().to_be_bytes::<32>().as_slice(),
        signature.s().to_be_bytes::<32>().as_slice(),
        &[v],
    ]
    .concat();
    format!("0x{}", hex::encode(bytes))
}

/// Decode a `0x`-prefixed 65-byte signature.
///
/// The recovery byte may be either the raw parity (0/1) or the legacy
/// `27 + parity` form (27/28).
pub fn decode_signature(input: &str) -> Result<PrimitiveSignature, VerifyError> {
    let hex_str = input
        .strip_prefix("0x")
        .ok_or(VerifyError::InvalidSignatureHex)?;
    let decoded = hex::decode(hex_str).map_err(|_| VerifyError::InvalidSignatureHex)?;
    let bytes: [u8; SIGNATURE_LEN] = decoded
        .try_into()
        .map_err(|rejected: Vec<u8>| VerifyError::InvalidSignatureLength(rejected.len()))?;

    let (&v, rs) = bytes
        .split_last()
        .ok_or(VerifyError::InvalidSignatureLength(0))?;
    let y_parity = match v {
        0 | 27 => false,
        1 | 28 => true,
        other => return Err(VerifyError::InvalidRecoveryId(other)),
    };
    let (r, s) = rs.split_at(32);
    Ok(PrimitiveSignature::new(
        U256::from_be_slice(r),
        U256::from_be_slice(s),
        y_parity,
    ))
}

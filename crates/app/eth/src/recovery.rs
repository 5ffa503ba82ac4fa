//! Signer recovery from a 65-byte signature over a message hash.

use alloy_primitives::{keccak256, Address, PrimitiveSignature, B256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1};
use std::sync::OnceLock;

use crate::error::VerifyError;

/// Recover the address that produced `signature` over `hash`.
pub fn recover_signer(hash: B256, signature: &PrimitiveSignature) -> Result<Address, VerifyError> {
    let recoverable = to_recoverable(signature)?;
    let public_key = secp()
        .recover_ecdsa(&Message::from_digest(hash.0), &recoverable)
        .map_err(|_| VerifyError::Recovery)?;
    Ok(public_key_address(&public_key))
}

fn to_recoverable(signature: &PrimitiveSignature) -> Result<RecoverableSignature, VerifyError> {
    let compact = [
        signature.r().to_be_bytes::<32>(),
        signature.s().to_be_bytes::<32>(),
    ]
    .concat();
    let parity = RecoveryId::from_i32(i32::from(signature.v())).map_err(|_| VerifyError::Recovery)?;
    RecoverableSignature::from_compact(&compact, parity).map_err(|_| VerifyError::Recovery)
}

fn public_key_address(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let coordinates = uncompressed
        .split_first()
        .map_or(&[][..], |(_tag, rest)| rest);
    Address::from_word(keccak256(coordinates))
}

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}
#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::eip191::hash_personal_message;
    use crate::key::address_of;
    use alloy_primitives::U256;
    use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey};
    use rand::rngs::OsRng;

    fn sign_hash(signing_key: &SigningKey, hash: B256) -> PrimitiveSignature {
        let (sig, recovery_id) = signing_key.sign_prehash(hash.as_ref()).expect("sign");
        let r = U256::from_be_slice(&sig.r().to_bytes());
        let s = U256::from_be_slice(&sig.s().to_bytes());
        PrimitiveSignature::new(r, s, recovery_id.is_y_odd())
    }

    #[test]
    fn test_recover_signer_from_personal_message() {
        let signing_key = SigningKey::random(&mut OsRng);
        let hash = hash_personal_message("recover me");
        let signature = sign_hash(&signing_key, hash);

        let recovered = recover_signer(hash, &signature).expect("recover");

        assert_eq!(recovered, address_of(&signing_key));
    }

    #[test]
    fn test_recover_rejects_out_of_range_components() {
        let hash = hash_personal_message("invalid-components");
        let invalid = PrimitiveSignature::new(U256::MAX, U256::MAX, false);

        assert_eq!(recover_signer(hash, &invalid), Err(VerifyError::Recovery));
    }

    #[test]
    fn test_recover_rejects_zero_components() {
        let hash = hash_personal_message("zero-components");
        let zero = PrimitiveSignature::new(U256::ZERO, U256::ZERO, true);

        assert_eq!(recover_signer(hash, &zero), Err(VerifyError::Recovery));
    }

    #[test]
    fn test_flipped_parity_recovers_someone_else() {
        let signing_key = SigningKey::random(&mut OsRng);
        let hash = hash_personal_message("forged-recovery-id");
        let valid = sign_hash(&signing_key, hash);
        let forged = PrimitiveSignature::new(valid.r(), valid.s(), !valid.v());

        let recovered_valid = recover_signer(hash, &valid).expect("recover valid");
        let recovered_forged = recover_signer(hash, &forged);

        assert_eq!(recovered_valid, address_of(&signing_key));
        if let Ok(other) = recovered_forged {
            assert_ne!(other, recovered_valid);
        }
    }
}

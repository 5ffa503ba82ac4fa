//! EIP-191 personal message hashing.

use alloy_primitives::{eip191_hash_message, B256};

/// Hash a UTF-8 message the way `personal_sign` does.
///
/// The length prefix is the decimal byte length, not the character count.
pub fn hash_personal_message(message: &str) -> B256 {
    eip191_hash_message(message.as_bytes())
}

//! Wallet provider error types following EIP-1193 error codes.

use sigpad_eth::SignerError;
use thiserror::Error;

/// Provider error codes from EIP-1193 and JSON-RPC 2.0.
pub mod codes {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested account has not been authorized.
    pub const UNAUTHORIZED: i64 = 4100;
    /// The provider does not support the method.
    pub const UNSUPPORTED_METHOD: i64 = 4200;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i64 = -32603;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Error object returned by the provider. Displays the provider's message.
    #[error("{message}")]
    Rpc { code: i64, message: String },

    #[error("wallet transport error: {0}")]
    Transport(String),

    #[error("invalid wallet response: {0}")]
    InvalidResponse(String),

    #[error("wallet returned no accounts")]
    NoAccounts,
}

impl WalletError {
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        WalletError::Rpc {
            code,
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::rpc(codes::USER_REJECTED, "User rejected the request.")
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, WalletError::Rpc { code, .. } if *code == codes::USER_REJECTED)
    }
}

impl From<WalletError> for SignerError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Rpc { code, message } => SignerError::Provider {
                code: Some(code),
                message,
            },
            other => SignerError::Provider {
                code: None,
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_keeps_code_and_message() {
        let signer_err: SignerError = WalletError::user_rejected().into();
        assert_eq!(
            signer_err,
            SignerError::Provider {
                code: Some(codes::USER_REJECTED),
                message: "User rejected the request.".to_string(),
            }
        );
    }

    #[test]
    fn test_transport_error_has_no_code() {
        let signer_err: SignerError = WalletError::Transport("connection refused".into()).into();
        assert_eq!(
            signer_err.to_string(),
            "wallet transport error: connection refused"
        );
        assert!(matches!(signer_err, SignerError::Provider { code: None, .. }));
    }

    #[test]
    fn test_is_user_rejection() {
        assert!(WalletError::user_rejected().is_user_rejection());
        assert!(!WalletError::NoAccounts.is_user_rejection());
    }
}

//! Workflow error types.

use sigpad_eth::{KeyFormatError, SignerError};
use thiserror::Error;

use crate::types::FailureKind;

/// An action was invoked in a state that does not offer it.
///
/// These never change flow state; they correspond to a disabled control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("a signing request is already in flight")]
    SignInFlight,

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("a private key is required for the private key method")]
    MissingPrivateKey,

    #[error("verification already has a result, reset it first")]
    VerificationNotIdle,

    #[error("address, message and signature are all required")]
    IncompleteVerification,

    #[error("no successful signing result to transfer")]
    NoSigningResult,
}

/// Local checks that fail before any signing capability is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),

    #[error("Wallet extension not detected.")]
    ExtensionUnavailable,
}

/// Why a signing attempt ended in `Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Delegate(#[from] SignerError),
}

impl SignFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            SignFailure::Validation(_) => FailureKind::Validation,
            SignFailure::Delegate(_) => FailureKind::Delegate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown signing method '{0}', expected private_key or extension")]
pub struct ParseSignMethodError(pub String);

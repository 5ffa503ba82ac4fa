//! Request and outcome records for both flows.

use std::fmt;
use std::str::FromStr;

use sigpad_eth::{SignedMessage, VerifyError};

use crate::error::ParseSignMethodError;

/// How the signer flow produces a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMethod {
    #[default]
    PrivateKey,
    Extension,
}

impl SignMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignMethod::PrivateKey => "private_key",
            SignMethod::Extension => "extension",
        }
    }

    /// Tab label shown in the signer panel.
    pub fn label(&self) -> &'static str {
        match self {
            SignMethod::PrivateKey => "Private Key",
            SignMethod::Extension => "Extension",
        }
    }
}

impl fmt::Display for SignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignMethod {
    type Err = ParseSignMethodError;

    /// Case-insensitive; accepts `_` or `-` separators and a few short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "private_key" | "privatekey" | "key" | "pk" => Ok(Self::PrivateKey),
            "extension" | "ext" | "wallet" => Ok(Self::Extension),
            _ => Err(ParseSignMethodError(s.to_string())),
        }
    }
}

/// Signer panel inputs.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningRequest {
    pub message: String,
    pub method: SignMethod,
    pub private_key: Option<String>,
}

impl fmt::Debug for SigningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningRequest")
            .field("message", &self.message)
            .field("method", &self.method)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Which half of the error taxonomy a signing failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected locally; no signing capability was called.
    Validation,
    /// The signing capability was called and failed.
    Delegate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SigningOutcome {
    #[default]
    Idle,
    InFlight,
    Success(SignedMessage),
    Failure { kind: FailureKind, message: String },
}

impl SigningOutcome {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SigningOutcome::InFlight)
    }

    pub fn success(&self) -> Option<&SignedMessage> {
        match self {
            SigningOutcome::Success(signed) => Some(signed),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SigningOutcome::Failure { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Verifier panel inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerificationRequest {
    pub address: String,
    pub message: String,
    pub signature: String,
}

impl VerificationRequest {
    /// All three fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.address.is_empty() && !self.message.is_empty() && !self.signature.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationOutcome {
    #[default]
    Idle,
    Match,
    Mismatch,
    /// The inputs could not be interpreted; see [`VerifyError::code`].
    Error(VerifyError),
}

impl VerificationOutcome {
    pub fn is_idle(&self) -> bool {
        matches!(self, VerificationOutcome::Idle)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, VerificationOutcome::Error(_))
    }
}

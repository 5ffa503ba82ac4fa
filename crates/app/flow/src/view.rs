//! What each panel shows, derived from flow state.

use crate::signer_flow::SignerFlow;
use crate::types::{SignMethod, SigningOutcome, VerificationOutcome};
use crate::verifier_flow::VerifierFlow;

pub const SIGN_LABEL: &str = "GENERATE SIGNATURE";
pub const SIGN_LABEL_AGAIN: &str = "RE-GENERATE SIGNATURE";
pub const SIGN_LABEL_BUSY: &str = "Calculating...";
pub const FILL_LABEL: &str = "Fill to Verifier";
pub const VERIFY_LABEL: &str = "VERIFY MATCH";

/// Verification result badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultBadge {
    Matched,
    Mismatch,
    FormatError,
}

impl ResultBadge {
    pub fn label(&self) -> &'static str {
        match self {
            ResultBadge::Matched => "SIGNATURE MATCHED",
            ResultBadge::Mismatch => "MISMATCH FAILED",
            ResultBadge::FormatError => "FORMAT ERROR",
        }
    }

    fn from_outcome(outcome: &VerificationOutcome) -> Option<Self> {
        match outcome {
            VerificationOutcome::Idle => None,
            VerificationOutcome::Match => Some(ResultBadge::Matched),
            VerificationOutcome::Mismatch => Some(ResultBadge::Mismatch),
            VerificationOutcome::Error(_) => Some(ResultBadge::FormatError),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerPanel {
    pub method: SignMethod,
    pub message: String,
    /// `None` when the key field is hidden (extension method).
    pub private_key: Option<String>,
    pub action_label: &'static str,
    pub action_enabled: bool,
    pub signature: Option<String>,
    pub address: Option<String>,
    pub error: Option<String>,
    pub can_fill_verifier: bool,
}

impl SignerPanel {
    fn new(flow: &SignerFlow) -> Self {
        let request = flow.request();
        let outcome = flow.outcome();
        let success = outcome.success();

        let action_label = match outcome {
            SigningOutcome::InFlight => SIGN_LABEL_BUSY,
            SigningOutcome::Success(_) => SIGN_LABEL_AGAIN,
            _ => SIGN_LABEL,
        };

        Self {
            method: request.method,
            message: request.message.clone(),
            private_key: (request.method == SignMethod::PrivateKey)
                .then(|| request.private_key.clone().unwrap_or_default()),
            action_label,
            action_enabled: flow.can_sign(),
            signature: success.map(|s| s.signature.clone()),
            address: success.map(|s| s.address.clone()),
            error: outcome.failure_message().map(str::to_string),
            can_fill_verifier: success.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierPanel {
    pub address: String,
    pub message: String,
    pub signature: String,
    pub verify_enabled: bool,
    pub result: Option<ResultBadge>,
    /// Numeric code and text for a format error.
    pub error_detail: Option<(u16, String)>,
}

impl VerifierPanel {
    fn new(flow: &VerifierFlow) -> Self {
        let request = flow.request();
        let error_detail = match flow.outcome() {
            VerificationOutcome::Error(err) => Some((err.code(), err.to_string())),
            _ => None,
        };
        Self {
            address: request.address.clone(),
            message: request.message.clone(),
            signature: request.signature.clone(),
            verify_enabled: flow.can_verify(),
            result: ResultBadge::from_outcome(flow.outcome()),
            error_detail,
        }
    }
}

/// Snapshot of both panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub signer: SignerPanel,
    pub verifier: VerifierPanel,
}

impl FormView {
    pub fn new(signer: &SignerFlow, verifier: &VerifierFlow) -> Self {
        Self {
            signer: SignerPanel::new(signer),
            verifier: VerifierPanel::new(verifier),
        }
    }
}

//! The signer half of the workflow.

use sigpad_eth::SignedMessage;
use tracing::{debug, info, warn};

use crate::capabilities::Capabilities;
use crate::error::{FlowError, SignFailure};
use crate::types::{SignMethod, SigningOutcome, SigningRequest, VerificationRequest};
use crate::verifier_flow::transfer_to_verifier;

/// Signer inputs plus the outcome of the last attempt.
///
/// Any edit clears a previous outcome back to `Idle`. Edits are refused while
/// an attempt is in flight, so a result always belongs to the request that
/// produced it.
#[derive(Debug, Clone)]
pub struct SignerFlow {
    request: SigningRequest,
    outcome: SigningOutcome,
}

impl SignerFlow {
    pub fn new(message: impl Into<String>, method: SignMethod) -> Self {
        Self {
            request: SigningRequest {
                message: message.into(),
                method,
                private_key: None,
            },
            outcome: SigningOutcome::Idle,
        }
    }

    pub fn request(&self) -> &SigningRequest {
        &self.request
    }

    pub fn outcome(&self) -> &SigningOutcome {
        &self.outcome
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        let message = message.into();
        self.edit(|request| request.message = message)
    }

    pub fn set_method(&mut self, method: SignMethod) -> Result<(), FlowError> {
        self.edit(|request| request.method = method)
    }

    /// An empty string clears the key.
    pub fn set_private_key(&mut self, key: impl Into<String>) -> Result<(), FlowError> {
        let key = key.into();
        self.edit(|request| request.private_key = (!key.is_empty()).then_some(key))
    }

    fn edit(&mut self, apply: impl FnOnce(&mut SigningRequest)) -> Result<(), FlowError> {
        if self.outcome.is_in_flight() {
            return Err(FlowError::SignInFlight);
        }
        apply(&mut self.request);
        if self.outcome != SigningOutcome::Idle {
            debug!("signing request edited, clearing previous outcome");
            self.outcome = SigningOutcome::Idle;
        }
        Ok(())
    }

    /// Whether the sign action is enabled, and why not.
    pub fn check_ready(&self) -> Result<(), FlowError> {
        if self.outcome.is_in_flight() {
            return Err(FlowError::SignInFlight);
        }
        if self.request.message.is_empty() {
            return Err(FlowError::EmptyMessage);
        }
        if self.request.method == SignMethod::PrivateKey && self.request.private_key.is_none() {
            return Err(FlowError::MissingPrivateKey);
        }
        Ok(())
    }

    pub fn can_sign(&self) -> bool {
        self.check_ready().is_ok()
    }

    /// Move to `InFlight` and hand out the attempt to run.
    pub fn begin(&mut self) -> Result<SignAttempt, FlowError> {
        self.check_ready()?;
        self.outcome = SigningOutcome::InFlight;
        debug!(method = %self.request.method, "signing attempt started");
        Ok(SignAttempt {
            request: self.request.clone(),
        })
    }

    /// Record the result of the attempt handed out by [`begin`](Self::begin).
    ///
    /// Ignored when no attempt is in flight.
    pub fn finish(&mut self, result: Result<SignedMessage, SignFailure>) -> &SigningOutcome {
        if !self.outcome.is_in_flight() {
            warn!("dropping signing result, no attempt in flight");
            return &self.outcome;
        }
        self.outcome = match result {
            Ok(signed) => {
                info!(address = %signed.address, "message signed");
                SigningOutcome::Success(signed)
            }
            Err(failure) => {
                warn!(kind = ?failure.kind(), error = %failure, "signing failed");
                SigningOutcome::Failure {
                    kind: failure.kind(),
                    message: failure.to_string(),
                }
            }
        };
        &self.outcome
    }

    /// Verification inputs built from the current successful result.
    pub fn transfer(&self) -> Result<VerificationRequest, FlowError> {
        self.outcome
            .success()
            .map(|signed| transfer_to_verifier(signed, &self.request.message))
            .ok_or(FlowError::NoSigningResult)
    }
}

/// A signing request captured at [`SignerFlow::begin`].
#[derive(Debug, Clone)]
pub struct SignAttempt {
    request: SigningRequest,
}

impl SignAttempt {
    pub fn request(&self) -> &SigningRequest {
        &self.request
    }

    /// Validate locally, wait out the settle delay, then delegate.
    ///
    /// A validation failure returns before the delay and before any
    /// capability is called.
    pub async fn run(self, capabilities: &Capabilities) -> Result<SignedMessage, SignFailure> {
        let route = capabilities.route(&self.request)?;

        let delay = capabilities.settle_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let signer = capabilities.signer_for(route)?;
        Ok(signer.sign_message(&self.request.message).await?)
    }
}

//! The verifier half of the workflow.

use sigpad_eth::{SignatureVerifier, SignedMessage};
use tracing::{debug, info};

use crate::error::FlowError;
use crate::types::{VerificationOutcome, VerificationRequest};

/// Verification inputs built from a successful signing result.
pub fn transfer_to_verifier(signed: &SignedMessage, message: &str) -> VerificationRequest {
    VerificationRequest {
        address: signed.address.clone(),
        message: message.to_string(),
        signature: signed.signature.clone(),
    }
}

/// Verifier inputs plus the outcome of the last check.
#[derive(Debug, Clone, Default)]
pub struct VerifierFlow {
    request: VerificationRequest,
    outcome: VerificationOutcome,
}

impl VerifierFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) -> &VerificationRequest {
        &self.request
    }

    pub fn outcome(&self) -> &VerificationOutcome {
        &self.outcome
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.request.address = address.into();
        self.clear_outcome();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.request.message = message.into();
        self.clear_outcome();
    }

    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.request.signature = signature.into();
        self.clear_outcome();
    }

    /// Replace all three inputs at once and return to `Idle`.
    pub fn replace_request(&mut self, request: VerificationRequest) {
        self.request = request;
        self.clear_outcome();
    }

    /// Back to `Idle`, inputs kept.
    pub fn reset(&mut self) {
        self.clear_outcome();
    }

    fn clear_outcome(&mut self) {
        if !self.outcome.is_idle() {
            debug!("verification inputs changed, clearing previous outcome");
            self.outcome = VerificationOutcome::Idle;
        }
    }

    pub fn check_ready(&self) -> Result<(), FlowError> {
        if !self.outcome.is_idle() {
            return Err(FlowError::VerificationNotIdle);
        }
        if !self.request.is_complete() {
            return Err(FlowError::IncompleteVerification);
        }
        Ok(())
    }

    pub fn can_verify(&self) -> bool {
        self.check_ready().is_ok()
    }

    pub fn verify(
        &mut self,
        verifier: &dyn SignatureVerifier,
    ) -> Result<&VerificationOutcome, FlowError> {
        self.check_ready()?;

        let VerificationRequest {
            address,
            message,
            signature,
        } = &self.request;
        self.outcome = match verifier.verify_signature(address, message, signature) {
            Ok(true) => VerificationOutcome::Match,
            Ok(false) => VerificationOutcome::Mismatch,
            Err(err) => VerificationOutcome::Error(err),
        };
        info!(outcome = ?self.outcome, "signature verified");
        Ok(&self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigpad_eth::{Eip191Verifier, LocalKeySigner, VerifyError};

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn signed_flow(message: &str) -> VerifierFlow {
        let signed = LocalKeySigner::from_hex(KEY)
            .unwrap()
            .sign_message_sync(message)
            .unwrap();
        let mut flow = VerifierFlow::new();
        flow.replace_request(transfer_to_verifier(&signed, message));
        flow
    }

    #[test]
    fn test_match() {
        let mut flow = signed_flow("hello");
        assert_eq!(flow.verify(&Eip191Verifier), Ok(&VerificationOutcome::Match));
    }

    #[test]
    fn test_mismatch_after_message_edit() {
        let mut flow = signed_flow("hello");
        flow.set_message("hello!");
        assert_eq!(flow.verify(&Eip191Verifier), Ok(&VerificationOutcome::Mismatch));
    }

    #[test]
    fn test_error_for_malformed_signature() {
        let mut flow = signed_flow("hello");
        flow.set_signature("0x1234");
        assert_eq!(
            flow.verify(&Eip191Verifier),
            Ok(&VerificationOutcome::Error(VerifyError::InvalidSignatureLength(2)))
        );
    }

    #[test]
    fn test_verify_requires_idle_until_reset() {
        let mut flow = signed_flow("hello");
        flow.verify(&Eip191Verifier).unwrap();
        assert_eq!(
            flow.verify(&Eip191Verifier),
            Err(FlowError::VerificationNotIdle)
        );

        flow.reset();
        assert!(flow.outcome().is_idle());
        assert!(flow.can_verify());
    }

    #[test]
    fn test_edit_clears_outcome() {
        let mut flow = signed_flow("hello");
        flow.verify(&Eip191Verifier).unwrap();
        flow.set_address("0x0");
        assert!(flow.outcome().is_idle());
    }

    #[test]
    fn test_incomplete_inputs() {
        let mut flow = VerifierFlow::new();
        flow.set_address("0x2c7536E3605D9C16a7a3D7b1898e529396a65c23");
        assert_eq!(
            flow.verify(&Eip191Verifier),
            Err(FlowError::IncompleteVerification)
        );
        assert!(flow.outcome().is_idle());
    }
}

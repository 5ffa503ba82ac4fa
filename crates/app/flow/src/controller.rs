//! Both panels behind one controller.

use chrono::Utc;
use sigpad_eth::SignedMessage;

use crate::capabilities::Capabilities;
use crate::error::{FlowError, SignFailure};
use crate::seed::seed_message;
use crate::signer_flow::{SignAttempt, SignerFlow};
use crate::types::{SignMethod, SigningOutcome, VerificationOutcome, VerificationRequest};
use crate::verifier_flow::VerifierFlow;
use crate::view::FormView;

/// Owns the signer and verifier state and the capabilities they call.
///
/// The two halves are independent except for [`fill_verifier`], which copies a
/// successful signing result into the verifier inputs.
///
/// [`fill_verifier`]: SignVerifyController::fill_verifier
#[derive(Debug)]
pub struct SignVerifyController {
    signer: SignerFlow,
    verifier: VerifierFlow,
    capabilities: Capabilities,
}

impl SignVerifyController {
    /// Start with the sample sign-in payload and the private key method.
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_message(capabilities, seed_message(Utc::now()), SignMethod::default())
    }

    pub fn with_message(
        capabilities: Capabilities,
        message: impl Into<String>,
        method: SignMethod,
    ) -> Self {
        Self {
            signer: SignerFlow::new(message, method),
            verifier: VerifierFlow::new(),
            capabilities,
        }
    }

    pub fn signer(&self) -> &SignerFlow {
        &self.signer
    }

    pub fn verifier(&self) -> &VerifierFlow {
        &self.verifier
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        self.signer.set_message(message)
    }

    pub fn set_method(&mut self, method: SignMethod) -> Result<(), FlowError> {
        self.signer.set_method(method)
    }

    pub fn set_private_key(&mut self, key: impl Into<String>) -> Result<(), FlowError> {
        self.signer.set_private_key(key)
    }

    pub fn set_verify_address(&mut self, address: impl Into<String>) {
        self.verifier.set_address(address);
    }

    pub fn set_verify_message(&mut self, message: impl Into<String>) {
        self.verifier.set_message(message);
    }

    pub fn set_verify_signature(&mut self, signature: impl Into<String>) {
        self.verifier.set_signature(signature);
    }

    /// First half of a sign: the flow is `InFlight` once this returns.
    pub fn begin_sign(&mut self) -> Result<SignAttempt, FlowError> {
        self.signer.begin()
    }

    pub fn finish_sign(&mut self, result: Result<SignedMessage, SignFailure>) -> &SigningOutcome {
        self.signer.finish(result)
    }

    /// Run a whole signing attempt.
    ///
    /// `Err` means the action was not available; a failed attempt is an
    /// `Ok(Failure)` outcome.
    pub async fn sign(&mut self) -> Result<&SigningOutcome, FlowError> {
        let attempt = self.signer.begin()?;
        let result = attempt.run(&self.capabilities).await;
        Ok(self.signer.finish(result))
    }

    pub fn verify(&mut self) -> Result<&VerificationOutcome, FlowError> {
        self.verifier.verify(self.capabilities.verifier())
    }

    pub fn reset_verification(&mut self) {
        self.verifier.reset();
    }

    /// Copy the current successful signing result into the verifier.
    pub fn fill_verifier(&mut self) -> Result<&VerificationRequest, FlowError> {
        let request = self.signer.transfer()?;
        self.verifier.replace_request(request);
        Ok(self.verifier.request())
    }

    pub fn view(&self) -> FormView {
        FormView::new(&self.signer, &self.verifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

    #[test]
    fn test_new_seeds_sign_in_payload() {
        let controller = SignVerifyController::new(Capabilities::new());
        let request = controller.signer().request();
        assert!(request.message.contains("\"app\": \"Web3 Auth\""));
        assert_eq!(request.method, SignMethod::PrivateKey);
        assert!(controller.verifier().outcome().is_idle());
    }

    #[tokio::test]
    async fn test_sign_fill_verify() {
        let mut controller =
            SignVerifyController::with_message(Capabilities::new(), "hello", SignMethod::PrivateKey);
        controller.set_private_key(KEY).unwrap();

        let outcome = controller.sign().await.unwrap();
        assert_eq!(outcome.success().unwrap().address, ADDRESS);

        let request = controller.fill_verifier().unwrap();
        assert_eq!(request.message, "hello");
        assert_eq!(controller.verify(), Ok(&VerificationOutcome::Match));
    }

    #[tokio::test]
    async fn test_fill_resets_previous_verification() {
        let mut controller =
            SignVerifyController::with_message(Capabilities::new(), "hello", SignMethod::PrivateKey);
        controller.set_private_key(KEY).unwrap();
        controller.sign().await.unwrap();

        controller.set_verify_address(ADDRESS);
        controller.set_verify_message("other");
        controller.set_verify_signature("0x00");
        assert!(controller.verify().unwrap().is_error());

        controller.fill_verifier().unwrap();
        assert!(controller.verifier().outcome().is_idle());
    }

    #[test]
    fn test_fill_without_success() {
        let mut controller = SignVerifyController::new(Capabilities::new());
        assert_eq!(controller.fill_verifier(), Err(FlowError::NoSigningResult));
    }
}

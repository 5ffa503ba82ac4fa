//! Sign/verify workflow for sigpad.
//!
//! [`SignVerifyController`] holds two independent state machines:
//!
//! - the signer flow: `Idle -> InFlight -> Success | Failure`, driven by
//!   [`SignVerifyController::sign`] or the `begin_sign` / `finish_sign` pair;
//! - the verifier flow: `Idle -> Match | Mismatch | Error`, driven by
//!   [`SignVerifyController::verify`].
//!
//! Editing an input returns that flow to `Idle`. The only link between the two
//! is [`SignVerifyController::fill_verifier`], which copies a successful
//! signing result into the verifier inputs.
//!
//! Signing keys, the wallet provider and the verifier are injected through
//! [`Capabilities`].

pub mod capabilities;
pub mod controller;
pub mod error;
pub mod seed;
pub mod signer_flow;
pub mod types;
pub mod verifier_flow;
pub mod view;

pub use capabilities::{Capabilities, DEFAULT_SETTLE_DELAY};
pub use controller::SignVerifyController;
pub use error::{FlowError, ParseSignMethodError, SignFailure, ValidationError};
pub use seed::seed_message;
pub use signer_flow::{SignAttempt, SignerFlow};
pub use types::{
    FailureKind, SignMethod, SigningOutcome, SigningRequest, VerificationOutcome,
    VerificationRequest,
};
pub use verifier_flow::{transfer_to_verifier, VerifierFlow};
pub use view::{
    FormView, ResultBadge, SignerPanel, VerifierPanel, FILL_LABEL, SIGN_LABEL, SIGN_LABEL_AGAIN,
    SIGN_LABEL_BUSY, VERIFY_LABEL,
};

//! One-shot `sign` and `verify` commands.

use std::process::ExitCode;

use serde_json::json;
use sigpad_flow::{Capabilities, SignMethod, SignVerifyController, VerificationOutcome};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::cli::{SignArgs, VerifyArgs};
use crate::error::AppError;

/// Exit code for a mismatch or a failed signing attempt.
pub const EXIT_FAILED: u8 = 1;
/// Exit code for a verification format error or a command error.
pub const EXIT_ERROR: u8 = 2;

/// Use `message` if given, otherwise read `input` to the end.
///
/// One trailing newline is dropped from piped input.
pub async fn read_message<R>(message: Option<String>, mut input: R) -> Result<String, AppError>
where
    R: AsyncRead + Unpin,
{
    if let Some(message) = message {
        return Ok(message);
    }
    let mut buf = String::new();
    input.read_to_string(&mut buf).await?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

pub async fn sign(
    capabilities: Capabilities,
    default_method: SignMethod,
    args: SignArgs,
    message: String,
) -> Result<ExitCode, AppError> {
    let method = args.method.unwrap_or(default_method);
    let mut controller = SignVerifyController::with_message(capabilities, message, method);
    if let Some(key) = args.private_key {
        controller.set_private_key(key)?;
    }

    let outcome = controller.sign().await?;
    let Some(signed) = outcome.success() else {
        eprintln!(
            "signing failed: {}",
            outcome.failure_message().unwrap_or("no result")
        );
        return Ok(ExitCode::from(EXIT_FAILED));
    };

    if args.json {
        let report = json!({
            "method": method.as_str(),
            "address": signed.address,
            "signature": signed.signature,
        });
        println!("{report}");
    } else {
        println!("address:   {}", signed.address);
        println!("signature: {}", signed.signature);
    }
    Ok(ExitCode::SUCCESS)
}

/// Exit code for a verification outcome.
pub fn verify_exit_code(outcome: &VerificationOutcome) -> u8 {
    match outcome {
        VerificationOutcome::Match => 0,
        VerificationOutcome::Mismatch | VerificationOutcome::Idle => EXIT_FAILED,
        VerificationOutcome::Error(_) => EXIT_ERROR,
    }
}

pub fn verify(
    capabilities: Capabilities,
    args: VerifyArgs,
    message: String,
) -> Result<ExitCode, AppError> {
    let mut controller = SignVerifyController::new(capabilities);
    controller.set_verify_address(args.address);
    controller.set_verify_message(message);
    controller.set_verify_signature(args.signature);

    let outcome = controller.verify()?.clone();
    let panel = controller.view().verifier;
    let label = panel.result.map(|badge| badge.label()).unwrap_or_default();

    if args.json {
        let report = match &outcome {
            VerificationOutcome::Error(err) => json!({
                "result": label,
                "code": err.code(),
                "error": err.to_string(),
            }),
            _ => json!({ "result": label }),
        };
        println!("{report}");
    } else {
        println!("{label}");
        if let Some((code, detail)) = panel.error_detail {
            eprintln!("0x{code:02x}: {detail}");
        }
    }
    Ok(ExitCode::from(verify_exit_code(&outcome)))
}

//! Line-oriented interactive session over the controller.

use std::io;

use sigpad_flow::{ParseSignMethodError, SignMethod, SignVerifyController, VerificationOutcome};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::render::{render_form, render_signer, render_verifier};

const HELP: &str = "\
signer:
  method <private_key|extension>   choose how to sign
  key [0x...]                      set the private key (no argument clears it)
  msg [text]                       set the message; without text, read lines until a lone '.'
  sign                             generate the signature
  fill                             copy the signature, address and message into the verifier
verifier:
  vmsg [text]                      set the expected message (multi-line like msg)
  vaddr <0x...>                    set the expected signer address
  vsig <0x...>                     set the received signature
  verify                           check the signature
  reset                            clear the verification result
general:
  show                             print both panels
  help                             print this help
  quit                             leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Method(SignMethod),
    Key(String),
    /// `None` reads a multi-line block.
    Message(Option<String>),
    Sign,
    Fill,
    VerifyMessage(Option<String>),
    VerifyAddress(String),
    VerifySignature(String),
    Verify,
    Reset,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    /// Command word, without arguments.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Method(_) => "method",
            SessionCommand::Key(_) => "key",
            SessionCommand::Message(_) => "msg",
            SessionCommand::Sign => "sign",
            SessionCommand::Fill => "fill",
            SessionCommand::VerifyMessage(_) => "vmsg",
            SessionCommand::VerifyAddress(_) => "vaddr",
            SessionCommand::VerifySignature(_) => "vsig",
            SessionCommand::Verify => "verify",
            SessionCommand::Reset => "reset",
            SessionCommand::Show => "show",
            SessionCommand::Help => "help",
            SessionCommand::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type `help` for a list")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Method(#[from] ParseSignMethodError),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    // Only the separator after the command word is dropped from message text.
    let (word, raw) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let rest = raw.trim();
    let text = || (!rest.is_empty()).then(|| raw.to_string());

    let command = match word.to_lowercase().as_str() {
        "method" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("method"));
            }
            SessionCommand::Method(rest.parse()?)
        }
        "key" => SessionCommand::Key(rest.to_string()),
        "msg" => SessionCommand::Message(text()),
        "sign" => SessionCommand::Sign,
        "fill" => SessionCommand::Fill,
        "vmsg" => SessionCommand::VerifyMessage(text()),
        "vaddr" => SessionCommand::VerifyAddress(rest.to_string()),
        "vsig" => SessionCommand::VerifySignature(rest.to_string()),
        "verify" => SessionCommand::Verify,
        "reset" => SessionCommand::Reset,
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Read lines until a lone `.` or end of input, joined with `\n`.
async fn read_block<R>(lines: &mut Lines<R>) -> io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut collected = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim_end_matches('\r') == "." {
            break;
        }
        collected.push(line);
    }
    Ok(collected.join("\n"))
}

async fn emit<W>(output: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

/// Apply one command and write its reply.
pub async fn execute<W>(
    controller: &mut SignVerifyController,
    command: SessionCommand,
    output: &mut W,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let reply = match command {
        SessionCommand::Method(method) => match controller.set_method(method) {
            Ok(()) => format!("method: {}", method.label()),
            Err(e) => format!("error: {e}"),
        },
        SessionCommand::Key(key) => {
            let cleared = key.is_empty();
            match controller.set_private_key(key) {
                Ok(()) if cleared => "private key cleared".to_string(),
                Ok(()) => "private key set".to_string(),
                Err(e) => format!("error: {e}"),
            }
        }
        SessionCommand::Message(text) => {
            let text = text.unwrap_or_default();
            let len = text.len();
            match controller.set_message(text) {
                Ok(()) => format!("message set ({len} bytes)"),
                Err(e) => format!("error: {e}"),
            }
        }
        SessionCommand::Sign => {
            let attempt = match controller.begin_sign() {
                Ok(attempt) => attempt,
                Err(e) => return emit(output, &format!("sign unavailable: {e}")).await,
            };
            emit(output, &format!("  [ {} ]", controller.view().signer.action_label)).await?;
            let result = attempt.run(controller.capabilities()).await;
            controller.finish_sign(result);
            render_signer(&controller.view().signer)
        }
        SessionCommand::Fill => match controller.fill_verifier() {
            Ok(_) => render_verifier(&controller.view().verifier),
            Err(e) => format!("fill unavailable: {e}"),
        },
        SessionCommand::VerifyMessage(text) => {
            controller.set_verify_message(text.unwrap_or_default());
            "expected message set".to_string()
        }
        SessionCommand::VerifyAddress(address) => {
            controller.set_verify_address(address);
            "expected address set".to_string()
        }
        SessionCommand::VerifySignature(signature) => {
            controller.set_verify_signature(signature);
            "received signature set".to_string()
        }
        SessionCommand::Verify => match controller.verify() {
            Ok(_) => render_verifier(&controller.view().verifier),
            Err(e) => format!("verify unavailable: {e}"),
        },
        SessionCommand::Reset => {
            controller.reset_verification();
            "verification reset".to_string()
        }
        SessionCommand::Show => render_form(&controller.view()),
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => return Ok(()),
    };
    emit(output, &reply).await
}

/// Run the read-eval-print loop until `quit` or end of input.
///
/// Returns the last verification outcome.
pub async fn run_session<R, W>(
    controller: &mut SignVerifyController,
    input: R,
    mut output: W,
) -> io::Result<VerificationOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    emit(&mut output, &render_form(&controller.view())).await?;
    emit(&mut output, "\ntype `help` for commands").await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                emit(&mut output, &format!("error: {e}")).await?;
                continue;
            }
        };

        let command = match command {
            SessionCommand::Quit => break,
            SessionCommand::Message(None) => {
                SessionCommand::Message(Some(read_block(&mut lines).await?))
            }
            SessionCommand::VerifyMessage(None) => {
                SessionCommand::VerifyMessage(Some(read_block(&mut lines).await?))
            }
            other => other,
        };
        tracing::debug!(command = command.name(), "session command");
        execute(controller, command, &mut output).await?;
    }

    Ok(controller.verifier().outcome().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigpad_flow::Capabilities;
    use sigpad_wallet::InMemoryWallet;
    use std::sync::Arc;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn controller() -> SignVerifyController {
        SignVerifyController::new(Capabilities::new())
    }

    async fn transcript(
        controller: &mut SignVerifyController,
        script: &str,
    ) -> (String, VerificationOutcome) {
        let mut output = Vec::new();
        let outcome = run_session(controller, script.as_bytes(), &mut output)
            .await
            .expect("session");
        (String::from_utf8(output).expect("utf8"), outcome)
    }

    #[test]
    fn inline_message_keeps_its_spacing() {
        assert_eq!(
            parse_command("msg  padded text  "),
            Ok(Some(SessionCommand::Message(Some(" padded text  ".into()))))
        );
        assert_eq!(
            parse_command("vmsg\tx "),
            Ok(Some(SessionCommand::VerifyMessage(Some("x ".into()))))
        );
        assert_eq!(parse_command("msg   "), Ok(Some(SessionCommand::Message(None))));
        assert_eq!(
            parse_command("vaddr  0xabc "),
            Ok(Some(SessionCommand::VerifyAddress("0xabc".into())))
        );
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("method extension"),
            Ok(Some(SessionCommand::Method(SignMethod::Extension)))
        );
        assert_eq!(
            parse_command("msg hello world"),
            Ok(Some(SessionCommand::Message(Some("hello world".into()))))
        );
        assert_eq!(parse_command("msg"), Ok(Some(SessionCommand::Message(None))));
        assert_eq!(parse_command("key"), Ok(Some(SessionCommand::Key(String::new()))));
        assert_eq!(parse_command("VERIFY\r"), Ok(Some(SessionCommand::Verify)));
        assert_eq!(parse_command("exit"), Ok(Some(SessionCommand::Quit)));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!(
            parse_command("launch"),
            Err(CommandError::Unknown("launch".into()))
        );
        assert_eq!(
            parse_command("method"),
            Err(CommandError::MissingArgument("method"))
        );
        assert!(matches!(
            parse_command("method ledger"),
            Err(CommandError::Method(_))
        ));
    }

    #[tokio::test]
    async fn sign_fill_verify_script() {
        let mut controller = controller();
        let script = format!("key {KEY}\nmsg hello\nsign\nfill\nverify\nquit\nshow\n");
        let (out, outcome) = transcript(&mut controller, &script).await;

        assert_eq!(outcome, VerificationOutcome::Match);
        assert!(out.contains("[ Calculating... ]"));
        assert!(out.contains("[ RE-GENERATE SIGNATURE ]"));
        assert!(out.contains("<< SIGNATURE MATCHED >>"));
        assert!(!out.contains(&KEY[6..]));
    }

    #[tokio::test]
    async fn multi_line_messages() {
        let mut controller = controller();
        let script = "msg\n{\n  \"a\": 1\n}\n.\nvmsg\nline\n.\n";
        transcript(&mut controller, script).await;

        assert_eq!(controller.signer().request().message, "{\n  \"a\": 1\n}");
        assert_eq!(controller.verifier().request().message, "line");
    }

    #[tokio::test]
    async fn edited_message_mismatches_until_reset() {
        let mut controller = controller();
        let script = format!(
            "key {KEY}\nmsg hello\nsign\nfill\nvmsg hello!\nverify\nverify\nreset\n"
        );
        let (out, outcome) = transcript(&mut controller, &script).await;

        assert!(out.contains("<< MISMATCH FAILED >>"));
        assert!(out.contains("verify unavailable"));
        assert!(out.contains("verification reset"));
        assert_eq!(outcome, VerificationOutcome::Idle);
    }

    #[tokio::test]
    async fn bad_key_reports_validation_error() {
        let mut controller = controller();
        let (out, _) = transcript(&mut controller, "key 0x1234\nsign\nfill\n").await;

        assert!(out.contains("Private Key must start with 0x and be 66 characters long."));
        assert!(out.contains("fill unavailable"));
    }

    #[tokio::test]
    async fn extension_without_wallet() {
        let mut controller = controller();
        let (out, _) = transcript(&mut controller, "method extension\nsign\n").await;
        assert!(out.contains("Wallet extension not detected."));
    }

    #[tokio::test]
    async fn extension_with_dev_wallet() {
        let wallet = Arc::new(InMemoryWallet::from_private_keys([KEY]).unwrap());
        let mut controller = SignVerifyController::new(Capabilities::new().with_wallet(wallet));
        let (out, outcome) =
            transcript(&mut controller, "method ext\nsign\nfill\nverify\n").await;

        assert!(out.contains("0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"));
        assert_eq!(outcome, VerificationOutcome::Match);
    }

    #[tokio::test]
    async fn unknown_command_keeps_session_alive() {
        let mut controller = controller();
        let (out, _) = transcript(&mut controller, "dance\nhelp\n").await;
        assert!(out.contains("unknown command 'dance'"));
        assert!(out.contains("vaddr <0x...>"));
    }
}

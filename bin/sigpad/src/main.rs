//! sigpad: produce and check Ethereum personal message signatures.

mod cli;
mod commands;
mod error;
mod render;
mod session;

use std::process::ExitCode;

use clap::Parser;
use sigpad_flow::{SignMethod, SignVerifyController};
use sigpad_operations::{init_logging_from_config, write_default_config};
use tokio::io::BufReader;

use crate::cli::{build_capabilities, resolve_config, Cli, Command};
use crate::error::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(commands::EXIT_ERROR)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    // Init must work even when the existing file no longer parses.
    if let Command::Init(args) = &cli.command {
        write_default_config(&cli.common.config, args.force)?;
        println!("wrote {}", cli.common.config.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = resolve_config(&cli.common)?;
    init_logging_from_config(
        &config.observability.log_level,
        &config.observability.log_format,
    )?;
    let default_method: SignMethod = config.signer.default_method.parse()?;
    let capabilities = build_capabilities(&config, &cli.common)?;
    tracing::debug!(
        config = %cli.common.config.display(),
        method = %default_method,
        "configuration resolved"
    );

    match cli.command {
        Command::Init(_) => Ok(ExitCode::SUCCESS),
        Command::Sign(args) => {
            let message = commands::read_message(args.message.clone(), tokio::io::stdin()).await?;
            commands::sign(capabilities, default_method, args, message).await
        }
        Command::Verify(args) => {
            let message = commands::read_message(args.message.clone(), tokio::io::stdin()).await?;
            commands::verify(capabilities, args, message)
        }
        Command::Session => {
            let mut controller = SignVerifyController::new(capabilities);
            controller.set_method(default_method)?;
            let input = BufReader::new(tokio::io::stdin());
            session::run_session(&mut controller, input, tokio::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sigpad_flow::{Capabilities, SignMethod};
use sigpad_operations::{build_figment, extract_config, SigpadConfig, DEFAULT_CONFIG_PATH};
use sigpad_wallet::{HttpWalletProvider, InMemoryWallet};

use crate::error::AppError;

#[derive(Debug, Parser)]
#[command(name = "sigpad")]
#[command(about = "Sign and verify Ethereum personal messages")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Config YAML path (defaults apply if missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log level override
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format override (json or pretty)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Wallet JSON-RPC endpoint for the extension method
    #[arg(long, global = true, conflicts_with = "dev_wallet_key")]
    pub wallet_rpc_url: Option<String>,

    /// Serve the extension method from an in-memory wallet holding this key
    #[arg(long, global = true)]
    pub dev_wallet_key: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config file
    Init(InitArgs),
    /// Sign a message and print the signature and signer address
    Sign(SignArgs),
    /// Verify a signature (exit 0 on match, 1 on mismatch, 2 on format error)
    Verify(VerifyArgs),
    /// Interactive signer/verifier session
    Session,
}

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SignArgs {
    /// Signing method (private_key or extension); defaults to the configured one
    #[arg(long)]
    pub method: Option<SignMethod>,

    /// Private key (0x + 64 hex chars) for the private_key method
    #[arg(long)]
    pub private_key: Option<String>,

    /// Message to sign; read from stdin when omitted
    #[arg(long)]
    pub message: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Expected signer address
    #[arg(long)]
    pub address: String,

    /// 0x-prefixed 65-byte signature
    #[arg(long)]
    pub signature: String,

    /// Signed message; read from stdin when omitted
    #[arg(long)]
    pub message: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resolve configuration from: defaults < YAML < CLI flags.
pub fn resolve_config(common: &CommonArgs) -> Result<SigpadConfig, AppError> {
    let mut figment = build_figment(&common.config);

    if let Some(ref v) = common.log_level {
        figment = figment.merge(("observability.log_level", v.as_str()));
    }
    if let Some(ref v) = common.log_format {
        figment = figment.merge(("observability.log_format", v.as_str()));
    }
    if let Some(ref v) = common.wallet_rpc_url {
        figment = figment.merge(("wallet.rpc_url", v.as_str()));
    }

    Ok(extract_config(&figment)?)
}

/// Wire the signing and verification capabilities for this run.
///
/// `--dev-wallet-key` takes the place of any configured endpoint.
pub fn build_capabilities(
    config: &SigpadConfig,
    common: &CommonArgs,
) -> Result<Capabilities, AppError> {
    let capabilities = Capabilities::new()
        .with_settle_delay(Duration::from_millis(config.signer.settle_delay_ms));

    if let Some(ref key) = common.dev_wallet_key {
        let wallet = InMemoryWallet::from_private_keys([key])?;
        tracing::info!(accounts = ?wallet.addresses(), "using in-memory dev wallet");
        return Ok(capabilities.with_wallet(Arc::new(wallet)));
    }
    if let Some(ref url) = config.wallet.rpc_url {
        tracing::info!(%url, "using wallet JSON-RPC endpoint");
        return Ok(capabilities.with_wallet(Arc::new(HttpWalletProvider::new(url.as_str())?)));
    }

    tracing::debug!("no wallet configured, extension method unavailable");
    Ok(capabilities)
}

use sigpad_eth::SignerError;
use sigpad_flow::{FlowError, ParseSignMethodError};
use sigpad_operations::{ConfigError, LoggingError};
use sigpad_wallet::WalletError;
use thiserror::Error;

/// Anything that stops a command before it produces a result.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("configured signer.default_method: {0}")]
    Method(#[from] ParseSignMethodError),

    #[error("dev wallet: {0}")]
    DevWallet(#[from] SignerError),

    #[error("wallet: {0}")]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

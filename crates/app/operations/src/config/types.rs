//! Configuration types for sigpad.

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Every section is optional; an empty file (or no file) yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigpadConfig {
    #[serde(default)]
    pub signer: SignerConfig,

    #[serde(default, skip_serializing_if = "WalletConfig::is_unset")]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Signer panel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignerConfig {
    /// Method selected at session start: private_key or extension.
    #[serde(default = "SignerConfig::default_method")]
    pub default_method: String,

    /// Pause between validation and signing, in milliseconds. Default: 150.
    #[serde(default = "SignerConfig::default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            default_method: Self::default_method(),
            settle_delay_ms: Self::default_settle_delay_ms(),
        }
    }
}

impl SignerConfig {
    fn default_method() -> String {
        "private_key".to_string()
    }

    const fn default_settle_delay_ms() -> u64 {
        150
    }
}

/// Wallet provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of an EIP-1193 wallet. Unset means no wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

impl WalletConfig {
    pub fn is_unset(&self) -> bool {
        self.rpc_url.is_none()
    }
}

/// Observability configuration for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level, or a filter directive such as `sigpad_flow=debug,info`. Default: info.
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,

    /// Log format: json or pretty. Default: pretty.
    #[serde(default = "ObservabilityConfig::default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: Self::default_log_format(),
        }
    }
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_log_format() -> String {
        "pretty".to_string()
    }
}

//! Configuration validation.
//!
//! Validates configuration and collects all errors before returning,
//! enabling users to fix multiple issues in a single iteration.

use tracing_subscriber::EnvFilter;

use crate::config::types::{ObservabilityConfig, SigpadConfig, SignerConfig, WalletConfig};
use crate::errors::ConfigError;

/// Maximum settle delay: 10 seconds.
const MAX_SETTLE_DELAY_MS: u64 = 10_000;

const VALID_METHODS: [&str; 2] = ["private_key", "extension"];
const VALID_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const VALID_FORMATS: [&str; 2] = ["json", "pretty"];

/// Validate the entire configuration.
///
/// Collects all validation errors and returns them together.
pub fn validate_config(config: &SigpadConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_signer_config(&config.signer, &mut errors);
    validate_wallet_config(&config.wallet, &mut errors);
    validate_observability_config(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_signer_config(config: &SignerConfig, errors: &mut Vec<String>) {
    if !VALID_METHODS.contains(&config.default_method.as_str()) {
        errors.push(format!(
            "signer.default_method '{}' is invalid. Valid methods: private_key, extension",
            config.default_method
        ));
    }

    if config.settle_delay_ms > MAX_SETTLE_DELAY_MS {
        errors.push(format!(
            "signer.settle_delay_ms must be at most {} ms",
            MAX_SETTLE_DELAY_MS
        ));
    }
}

fn validate_wallet_config(config: &WalletConfig, errors: &mut Vec<String>) {
    let Some(url) = &config.rpc_url else {
        return;
    };

    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    match rest {
        None => errors.push(format!(
            "wallet.rpc_url '{}' must start with http:// or https://",
            url
        )),
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            errors.push(format!("wallet.rpc_url '{}' has no host", url))
        }
        Some(_) => {}
    }
}

fn validate_observability_config(config: &ObservabilityConfig, errors: &mut Vec<String>) {
    if !is_valid_log_level(&config.log_level) {
        errors.push(format!(
            "observability.log_level '{}' is invalid. Use one of trace, debug, info, warn, error, off \
             or a filter directive such as sigpad_flow=debug,info",
            config.log_level
        ));
    }

    if !VALID_FORMATS.contains(&config.log_format.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_format '{}' is invalid. Valid formats: json, pretty",
            config.log_format
        ));
    }
}

/// A bare word must be a level name; anything with targets goes through `EnvFilter`.
fn is_valid_log_level(value: &str) -> bool {
    if value.contains(['=', ',', '[']) {
        EnvFilter::try_new(value).is_ok()
    } else {
        VALID_LEVELS.contains(&value.to_lowercase().as_str())
    }
}

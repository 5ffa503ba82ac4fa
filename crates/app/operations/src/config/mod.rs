//! Configuration loading and validation.
//!
//! This module provides:
//! - Configuration types with serde support
//! - YAML file loading, and figment layering for CLI overrides
//! - Fail-fast validation that collects all errors

mod loader;
pub mod types;
mod validation;

pub use loader::{
    build_figment, extract_config, load_config, load_config_from_str, write_default_config,
    DEFAULT_CONFIG_PATH,
};
pub use types::{ObservabilityConfig, SignerConfig, SigpadConfig, WalletConfig};
pub use validation::validate_config;

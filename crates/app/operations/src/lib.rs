//! Operations infrastructure for sigpad.
//!
//! - **Config**: YAML configuration with fail-fast validation, layered as
//!   defaults < file < command-line overrides
//! - **Observability**: `tracing-subscriber` setup with json or pretty output
//!
//! # Example
//!
//! ```no_run
//! use sigpad_operations::{build_figment, extract_config, init_logging_from_config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let figment = build_figment("sigpad.yaml").merge(("observability.log_level", "debug"));
//!     let config = extract_config(&figment)?;
//!
//!     init_logging_from_config(
//!         &config.observability.log_level,
//!         &config.observability.log_format,
//!     )?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;

pub use config::{
    build_figment, extract_config, load_config, load_config_from_str, validate_config,
    write_default_config, SigpadConfig, DEFAULT_CONFIG_PATH,
};
pub use errors::{ConfigError, LoggingError};
pub use observability::{init_logging, init_logging_from_config, LogFormat};

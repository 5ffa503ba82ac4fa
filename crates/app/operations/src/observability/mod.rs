//! Observability for sigpad: structured logging only.

pub mod logging;

pub use logging::{build_filter, init_logging, init_logging_from_config, LogFormat};

//! Configuration file loading.

use crate::config::types::SigpadConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use figment::providers::{Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "sigpad.yaml";

const DEFAULT_CONFIG_HEADER: &str = "# sigpad configuration\n\
# Precedence: built-in defaults < this file < command-line flags.\n";

const DEFAULT_CONFIG_FOOTER: &str = "\
# Uncomment to sign through a wallet's JSON-RPC endpoint:\n\
# wallet:\n\
#   rpc_url: http://127.0.0.1:1248\n";

/// Load and validate configuration from a YAML file.
///
/// Unlike [`build_figment`], the file must exist.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SigpadConfig, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    load_config_from_str(&content, &path_str)
}

/// Load and validate configuration from a YAML string.
pub fn load_config_from_str(content: &str, source_name: &str) -> Result<SigpadConfig, ConfigError> {
    // A file with no keys (or only comments) is a null document.
    let config: SigpadConfig = serde_yaml::from_str::<Option<SigpadConfig>>(content)
        .map_err(|e| ConfigError::Parse {
            path: source_name.to_string(),
            source: e,
        })?
        .unwrap_or_default();

    validate_config(&config)?;

    Ok(config)
}

/// Defaults layered under the YAML file at `path`.
///
/// A missing file contributes nothing. Callers merge CLI overrides on top
/// with `figment.merge(("section.key", value))` and finish with
/// [`extract_config`].
pub fn build_figment<P: AsRef<Path>>(path: P) -> Figment {
    Figment::from(Serialized::defaults(SigpadConfig::default())).merge(Yaml::file(path))
}

/// Extract and validate a layered configuration.
pub fn extract_config(figment: &Figment) -> Result<SigpadConfig, ConfigError> {
    let config: SigpadConfig = figment.extract().map_err(Box::new)?;
    validate_config(&config)?;
    Ok(config)
}

/// Write the default configuration to `path`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_default_config<P: AsRef<Path>>(path: P, force: bool) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path_str));
    }

    let body = serde_yaml::to_string(&SigpadConfig::default()).map_err(ConfigError::Render)?;
    let content = format!("{DEFAULT_CONFIG_HEADER}{body}{DEFAULT_CONFIG_FOOTER}");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite {
            path: path_str.clone(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| ConfigError::FileWrite {
        path: path_str.clone(),
        source: e,
    })?;

    tracing::info!(path = %path_str, "wrote default config");
    Ok(())
}

//! Loading node configuration and shared state from disk.
//!
//! Node settings may be written as TOML, YAML or JSON; the format follows
//! the file extension. Settings are validated on load, so a returned
//! `QrCodeConfig` is ready to build a node from.

use std::path::Path;

use qrnode_types::config::{QrCodeConfig, QrCodeSettings};
use qrnode_types::error::ConfigError;
use qrnode_types::tree::SharedState;
use thiserror::Error;

/// Errors from reading configuration or state files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Serialization format of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigLoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigLoadError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Parse and validate node settings.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<QrCodeConfig, ConfigLoadError> {
    let settings: QrCodeSettings = match format {
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigLoadError::Parse(e.to_string()))?
        }
        ConfigFormat::Yaml => {
            serde_yaml_ng::from_str(content).map_err(|e| ConfigLoadError::Parse(e.to_string()))?
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigLoadError::Parse(e.to_string()))?
        }
    };
    Ok(settings.into_config()?)
}

/// Load node settings from a `.toml`, `.yaml`/`.yml` or `.json` file.
pub fn load_config_file(path: &Path) -> Result<QrCodeConfig, ConfigLoadError> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content, format)?;
    tracing::debug!(?path, mode = %config.operation_mode, "loaded node config");
    Ok(config)
}

/// Load shared state from a JSON object file.
pub fn load_shared_state_file(path: &Path) -> Result<SharedState, ConfigLoadError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ConfigLoadError::Parse(e.to_string()))
}

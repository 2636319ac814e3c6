//! Core TOML config loading: read from path or platform default.

use crate::schema::SbxConfig;
use sbxctl_common::ConfigError;
use std::path::Path;
use tracing::{debug, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. A missing file is reported as
/// `ConfigError::FileNotFound`.
pub fn load_from_path(path: &Path) -> Result<SbxConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: SbxConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/sbxctl/config.toml`
///
/// If the file does not exist, a commented default is written (best-effort)
/// and defaults are returned.
pub fn load_default() -> Result<SbxConfig, ConfigError> {
    let path = match default_config_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("{e}; using built-in defaults");
            return Ok(SbxConfig::default());
        }
    };

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            debug!("no config found at {}, creating default", path.display());
            if let Err(e) = create_default_config(&path) {
                warn!("could not write default config: {e}");
            }
            Ok(SbxConfig::default())
        }
        Err(e) => Err(e),
    }
}

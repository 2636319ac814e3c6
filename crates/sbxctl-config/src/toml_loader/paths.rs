//! Where the config file lives, and writing the commented default.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use sbxctl_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Environment variable naming a config file to use instead of the default.
pub const CONFIG_PATH_ENV: &str = "SBXCTL_CONFIG";

/// `~/.config/sbxctl/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("sbxctl").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Path named by `SBXCTL_CONFIG`, if set and non-empty.
pub fn env_config_path() -> Option<PathBuf> {
    non_empty_path(std::env::var_os(CONFIG_PATH_ENV))
}

pub(super) fn non_empty_path(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Write the commented default config to `path`, creating parent directories.
///
/// An existing file is left alone.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |e: std::io::Error| {
        ConfigError::ParseError(format!("failed to write default config to {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => return Err(write_error(e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(write_error)?;

    info!("created default config at {}", path.display());
    Ok(())
}

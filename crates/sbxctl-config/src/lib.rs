//! sbxctl configuration.
//!
//! Settings come from three layers, later layers winning:
//! 1. built-in defaults (every section is `serde(default)`),
//! 2. `config.toml` in the platform config directory, or the file named by
//!    `--config` or `SBXCTL_CONFIG`,
//! 3. environment variables, including those loaded from `./.env`.

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ApiConfig, BridgeConfig, LoggingConfig, SandboxConfig, SbxConfig, DEFAULT_DOMAIN,
};

use std::path::Path;

use sbxctl_common::ConfigError;

/// Load, overlay the process environment, and validate.
///
/// `override_path` replaces the platform default file when given, then
/// `SBXCTL_CONFIG`. A named file must exist.
pub fn load_config(override_path: Option<&Path>) -> Result<SbxConfig, ConfigError> {
    let named = override_path
        .map(Path::to_path_buf)
        .or_else(toml_loader::env_config_path);
    let mut config = match named {
        Some(path) => toml_loader::load_from_path(&path)?,
        None => toml_loader::load_default()?,
    };

    env::apply_env(&mut config, |key| std::env::var(key).ok());
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sandbox]\nshell_minutes = 30\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.sandbox.shell_minutes, 30);
    }
}

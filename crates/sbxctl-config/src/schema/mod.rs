//! Configuration schema types for sbxctl.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod bridge;
mod logging;
mod sandbox;

pub use api::*;
pub use bridge::*;
pub use logging::*;
pub use sandbox::*;

use serde::{Deserialize, Serialize};

/// Root configuration for sbxctl.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SbxConfig {
    pub api: ApiConfig,
    pub sandbox: SandboxConfig,
    pub bridge: BridgeConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sections() {
        let config = SbxConfig::default();
        assert_eq!(config.api.domain, DEFAULT_DOMAIN);
        assert!(config.api.api_key.is_none());
        assert_eq!(config.sandbox.shell_minutes, 60);
        assert_eq!(config.bridge.poll_interval_ms, 100);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: SbxConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.domain, DEFAULT_DOMAIN);
        assert_eq!(config.bridge.join_timeout_ms, 1000);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: SbxConfig = toml::from_str(
            r#"
[sandbox]
default_template = "code-interpreter"

[bridge]
poll_interval_ms = 50
"#,
        )
        .unwrap();
        assert_eq!(config.sandbox.default_template.as_deref(), Some("code-interpreter"));
        assert_eq!(config.bridge.poll_interval_ms, 50);
        assert_eq!(config.bridge.join_timeout_ms, 1000);
        assert_eq!(config.sandbox.user, "user");
    }
}

//! Sandbox lifecycle settings.

use serde::{Deserialize, Serialize};

/// Defaults applied when creating or connecting to sandboxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Template alias used when `--alias` is not given.
    pub default_template: Option<String>,
    /// Sandbox timeout in minutes. `None` keeps the service default.
    pub minutes: Option<u32>,
    /// Timeout in minutes for interactive shells when no other value is set.
    pub shell_minutes: u32,
    /// User that owns uploaded files and runs commands.
    pub user: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            default_template: None,
            minutes: None,
            shell_minutes: 60,
            user: "user".to_string(),
        }
    }
}

impl SandboxConfig {
    /// Home directory of the sandbox user; uploads land here.
    pub fn home_dir(&self) -> String {
        if self.user == "root" {
            "/root".to_string()
        } else {
            format!("/home/{}", self.user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_dir_for_regular_user() {
        assert_eq!(SandboxConfig::default().home_dir(), "/home/user");
    }

    #[test]
    fn home_dir_for_root() {
        let config = SandboxConfig {
            user: "root".into(),
            ..SandboxConfig::default()
        };
        assert_eq!(config.home_dir(), "/root");
    }
}

//! Environment variable overlay and `.env` loading.

use std::path::Path;

use tracing::{debug, warn};

use crate::schema::SbxConfig;

pub const ENV_API_KEY: &str = "E2B_API_KEY";
pub const ENV_DOMAIN: &str = "E2B_DOMAIN";
pub const ENV_CUSTOM_IP: &str = "E2B_CUSTOM_IP";
pub const ENV_MINUTES: &str = "SANDBOX_MINUTES";

/// Load `.env` from `dir`, overriding variables already set in the process.
///
/// A missing file is not an error.
pub fn load_dotenv(dir: &Path) {
    let path = dir.join(".env");
    if !path.exists() {
        return;
    }
    match dotenvy::from_path_override(&path) {
        Ok(()) => debug!("loaded environment from {}", path.display()),
        Err(e) => warn!("failed to load {}: {e}", path.display()),
    }
}

/// Overlay environment values onto `config`.
///
/// `lookup` abstracts `std::env::var` so tests do not touch process state.
pub fn apply_env(config: &mut SbxConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
        config.api.api_key = Some(key);
    }
    if let Some(domain) = lookup(ENV_DOMAIN).filter(|v| !v.is_empty()) {
        config.api.domain = domain;
    }
    if let Some(ip) = lookup(ENV_CUSTOM_IP).filter(|v| !v.is_empty()) {
        config.api.custom_ip = Some(ip);
    }
    if let Some(minutes) = lookup(ENV_MINUTES).and_then(|v| parse_minutes(&v)) {
        config.sandbox.minutes = Some(minutes);
    }
}

/// Parse a positive minute count; anything else is ignored.
pub fn parse_minutes(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = SbxConfig::default();
        config.api.domain = "from-file.example".into();

        apply_env(
            &mut config,
            lookup_from(&[
                (ENV_API_KEY, "e2b_123"),
                (ENV_DOMAIN, "sandbox.corp"),
                (ENV_CUSTOM_IP, "10.0.0.5"),
                (ENV_MINUTES, "15"),
            ]),
        );

        assert_eq!(config.api.api_key.as_deref(), Some("e2b_123"));
        assert_eq!(config.api.domain, "sandbox.corp");
        assert_eq!(config.api.custom_ip.as_deref(), Some("10.0.0.5"));
        assert_eq!(config.sandbox.minutes, Some(15));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = SbxConfig::default();
        apply_env(&mut config, lookup_from(&[(ENV_API_KEY, ""), (ENV_DOMAIN, "")]));
        assert!(config.api.api_key.is_none());
        assert_eq!(config.api.domain, crate::DEFAULT_DOMAIN);
    }

    #[test]
    fn invalid_minutes_are_ignored() {
        assert_eq!(parse_minutes("0"), None);
        assert_eq!(parse_minutes("-5"), None);
        assert_eq!(parse_minutes("ten"), None);
        assert_eq!(parse_minutes(" 20 "), Some(20));

        let mut config = SbxConfig::default();
        apply_env(&mut config, lookup_from(&[(ENV_MINUTES, "abc")]));
        assert!(config.sandbox.minutes.is_none());
    }

    #[test]
    fn load_dotenv_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        load_dotenv(dir.path());
    }

    #[test]
    fn load_dotenv_sets_variables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "SBXCTL_DOTENV_TEST_MARKER=from-dotenv\n",
        )
        .unwrap();

        load_dotenv(dir.path());
        assert_eq!(
            std::env::var("SBXCTL_DOTENV_TEST_MARKER").as_deref(),
            Ok("from-dotenv")
        );
    }
}

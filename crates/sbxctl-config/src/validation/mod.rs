//! Full configuration validation.
//!
//! Each section has its own check; all errors are collected into a single
//! `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use std::net::IpAddr;

use crate::schema::SbxConfig;
use sbxctl_common::ConfigError;

use helpers::{validate_range, validate_range_u64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SbxConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_sandbox(&mut errors, config);
    validate_bridge(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &SbxConfig) {
    if config.api.domain.trim().is_empty() {
        errors.push("api.domain must not be empty".into());
    }
    if let Some(ref ip) = config.api.custom_ip {
        if ip.parse::<IpAddr>().is_err() {
            errors.push(format!("api.custom_ip = {ip} is not an IP address"));
        }
    }
    validate_range_u64(
        errors,
        "api.request_timeout_secs",
        config.api.request_timeout_secs,
        1,
        3600,
    );
}

fn validate_sandbox(errors: &mut Vec<String>, config: &SbxConfig) {
    if let Some(minutes) = config.sandbox.minutes {
        validate_range(errors, "sandbox.minutes", minutes, 1, 1440);
    }
    validate_range(
        errors,
        "sandbox.shell_minutes",
        config.sandbox.shell_minutes,
        1,
        1440,
    );
    if config.sandbox.user.trim().is_empty() {
        errors.push("sandbox.user must not be empty".into());
    }
}

fn validate_bridge(errors: &mut Vec<String>, config: &SbxConfig) {
    let bridge = &config.bridge;
    validate_range_u64(errors, "bridge.poll_interval_ms", bridge.poll_interval_ms, 10, 1000);
    validate_range_u64(
        errors,
        "bridge.join_timeout_ms",
        bridge.join_timeout_ms,
        100,
        30_000,
    );
    validate_range(errors, "bridge.default_rows", u32::from(bridge.default_rows), 1, 1000);
    validate_range(errors, "bridge.default_cols", u32::from(bridge.default_cols), 1, 1000);
}

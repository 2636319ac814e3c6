//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = SbxConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_poll_interval_out_of_range() {
    let mut config = SbxConfig::default();
    config.bridge.poll_interval_ms = 5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.poll_interval_ms"));
}

#[test]
fn catches_zero_default_rows() {
    let mut config = SbxConfig::default();
    config.bridge.default_rows = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.default_rows"));
}

#[test]
fn catches_bad_custom_ip() {
    let mut config = SbxConfig::default();
    config.api.custom_ip = Some("not-an-ip".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.custom_ip"));
}

#[test]
fn accepts_ipv6_custom_ip() {
    let mut config = SbxConfig::default();
    config.api.custom_ip = Some("::1".into());
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_minutes_beyond_a_day() {
    let mut config = SbxConfig::default();
    config.sandbox.minutes = Some(5000);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("sandbox.minutes"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = SbxConfig::default();
    config.api.domain = "  ".into();
    config.bridge.default_cols = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.domain"));
    assert!(err.contains("bridge.default_cols"));
    assert!(err.contains("; "));
}

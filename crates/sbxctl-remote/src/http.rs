//! Shared reqwest client construction and status handling.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use sbxctl_common::RemoteError;
use sbxctl_config::ApiConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body kept in an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Build an HTTP client for the given hosts.
///
/// Private deployments may use self-signed certificates, and may pin every
/// host to a fixed address. `hosts` lists the host names (without port) that
/// the client will talk to, so each can be pinned.
pub(crate) fn build_client(
    config: &ApiConfig,
    hosts: &[String],
    timeout: Option<Duration>,
) -> Result<reqwest::Client, RemoteError> {
    let mut builder = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    if config.accept_invalid_certs() {
        tracing::debug!(domain = %config.domain, "TLS certificate verification disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(ip) = pinned_ip(config)? {
        for host in hosts {
            tracing::debug!(%host, %ip, "pinning host");
            // reqwest takes the port from the URL; the one given here is ignored.
            builder = builder.resolve(host, SocketAddr::new(ip, 0));
        }
    }

    builder
        .build()
        .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {e}")))
}

fn pinned_ip(config: &ApiConfig) -> Result<Option<IpAddr>, RemoteError> {
    match config.custom_ip.as_deref() {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| RemoteError::Protocol(format!("invalid custom IP address: {raw}"))),
    }
}

/// Host name of the control plane, without port.
pub(crate) fn api_host(config: &ApiConfig) -> String {
    format!("api.{}", config.bare_domain())
}

/// Host name of a sandbox's process daemon, without port.
pub(crate) fn envd_host(config: &ApiConfig, sandbox_id: &str) -> String {
    format!("49983-{sandbox_id}.{}", config.bare_domain())
}

pub(crate) fn network_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Network(format!("request timed out: {e}"))
    } else {
        RemoteError::Network(e.to_string())
    }
}

/// Pass through successful responses; turn anything else into a [`RemoteError`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let text = text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
    tracing::debug!(%status, body = %text, "request failed");
    Err(RemoteError::from_status(status.as_u16(), text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn private(custom_ip: Option<&str>) -> ApiConfig {
        ApiConfig {
            domain: "sbx.internal:8443".into(),
            custom_ip: custom_ip.map(String::from),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn hosts_drop_the_port() {
        let config = private(None);
        assert_eq!(api_host(&config), "api.sbx.internal");
        assert_eq!(envd_host(&config, "ib12"), "49983-ib12.sbx.internal");
    }

    #[test]
    fn builds_pinned_client() {
        let config = private(Some("10.0.0.5"));
        let hosts = vec![api_host(&config)];
        assert!(build_client(&config, &hosts, Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn rejects_malformed_pin() {
        let config = private(Some("not-an-ip"));
        let err = build_client(&config, &[], None).unwrap_err();
        assert!(err.to_string().contains("not-an-ip"));
    }
}

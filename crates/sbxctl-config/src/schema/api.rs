//! Remote service endpoint and credential settings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain of the hosted service.
pub const DEFAULT_DOMAIN: &str = "e2b.app";

/// Connection settings for the control plane and in-sandbox daemons.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API key sent as `X-API-Key`. Usually supplied through `E2B_API_KEY`.
    pub api_key: Option<String>,
    /// Service domain. Anything other than the hosted default is a private deployment.
    pub domain: String,
    /// Resolve every host under `domain` to this address instead of using DNS.
    pub custom_ip: Option<String>,
    /// Skip TLS certificate verification. `None` means "only for private deployments".
    pub insecure_tls: Option<bool>,
    /// Timeout for unary HTTP requests, in seconds.
    pub request_timeout_secs: u64,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("domain", &self.domain)
            .field("custom_ip", &self.custom_ip)
            .field("insecure_tls", &self.insecure_tls)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            domain: DEFAULT_DOMAIN.to_string(),
            custom_ip: None,
            insecure_tls: None,
            request_timeout_secs: 60,
        }
    }
}

impl ApiConfig {
    /// Base URL of the control plane REST API.
    pub fn api_url(&self) -> String {
        format!("https://api.{}", self.domain)
    }

    /// Host of the process daemon running inside a sandbox.
    pub fn envd_host(&self, sandbox_id: &str) -> String {
        format!("49983-{sandbox_id}.{}", self.domain)
    }

    pub fn is_private_deployment(&self) -> bool {
        self.domain != DEFAULT_DOMAIN
    }

    /// Whether TLS certificate verification is disabled.
    pub fn accept_invalid_certs(&self) -> bool {
        self.insecure_tls.unwrap_or_else(|| self.is_private_deployment())
    }

    /// Domain without any `:port` suffix.
    pub fn bare_domain(&self) -> &str {
        self.domain.split(':').next().unwrap_or(&self.domain)
    }
}

//! Control plane client struct and request plumbing.

use std::time::Duration;

use reqwest::Method;
use sbxctl_common::RemoteError;
use sbxctl_config::ApiConfig;

use crate::http;

/// Client for the control plane REST API.
pub struct ApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Build a client from settings. Fails when no API key is configured.
    pub fn new(config: &ApiConfig) -> Result<Self, RemoteError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(RemoteError::Unauthorized)?;

        let http = http::build_client(
            config,
            &[http::api_host(config)],
            Some(Duration::from_secs(config.request_timeout_secs)),
        )?;

        Ok(Self {
            base_url: config.api_url(),
            config: config.clone(),
            http,
            api_key,
        })
    }

    /// Settings this client was built from.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = method.as_str(), url = url.as_str(), "control plane request");
        self.http
            .request(method, url)
            .header("X-API-Key", &self.api_key)
    }

    /// Send a request and return the response if it succeeded.
    pub(crate) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RemoteError> {
        let response = builder.send().await.map_err(http::network_error)?;
        http::check_status(response).await
    }

    /// Send a request and decode its JSON body.
    pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = self.send(builder).await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::Protocol(format!("invalid response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_unauthorized() {
        let err = ApiClient::new(&ApiConfig::default()).err().unwrap();
        assert!(matches!(err, RemoteError::Unauthorized));
    }

    #[test]
    fn empty_key_is_unauthorized() {
        let config = ApiConfig {
            api_key: Some(String::new()),
            ..ApiConfig::default()
        };
        assert!(ApiClient::new(&config).is_err());
    }

    #[test]
    fn base_url_follows_domain() {
        let config = ApiConfig {
            api_key: Some("e2b_test".into()),
            domain: "sbx.internal".into(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.sbx.internal");
    }
}

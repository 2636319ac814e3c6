//! Sandbox lifecycle calls.

use reqwest::{Method, StatusCode};
use sbxctl_common::RemoteError;

use super::client::ApiClient;
use super::types::{NewSandbox, SandboxCreated, SandboxDetail, SandboxListItem, TimeoutBody};

/// Timeout the service applies to a sandbox when none is given, in seconds.
pub const DEFAULT_SANDBOX_TIMEOUT_SECS: u64 = 300;

impl ApiClient {
    pub async fn list_sandboxes(&self) -> Result<Vec<SandboxListItem>, RemoteError> {
        self.send_json(self.request(Method::GET, "/v2/sandboxes"))
            .await
    }

    pub async fn get_sandbox(&self, sandbox_id: &str) -> Result<SandboxDetail, RemoteError> {
        let path = format!("/sandboxes/{sandbox_id}");
        self.send_json(self.request(Method::GET, &path)).await
    }

    /// Start a sandbox from a template id or alias. `timeout_secs` of `None`
    /// leaves the service default in place.
    pub async fn create_sandbox(
        &self,
        template: &str,
        timeout_secs: Option<u64>,
    ) -> Result<SandboxCreated, RemoteError> {
        let body = NewSandbox {
            template_id: template,
            timeout: timeout_secs,
        };
        let created: SandboxCreated = self
            .send_json(self.request(Method::POST, "/sandboxes").json(&body))
            .await?;
        tracing::info!(sandbox = %created.sandbox_id, template, "sandbox created");
        Ok(created)
    }

    /// Attach to a running sandbox, resuming it first if it is paused.
    pub async fn connect_sandbox(
        &self,
        sandbox_id: &str,
        timeout_secs: Option<u64>,
    ) -> Result<SandboxCreated, RemoteError> {
        let path = format!("/sandboxes/{sandbox_id}/connect");
        let body = TimeoutBody {
            timeout: timeout_secs.unwrap_or(DEFAULT_SANDBOX_TIMEOUT_SECS),
        };
        let connected: SandboxCreated = self
            .send_json(self.request(Method::POST, &path).json(&body))
            .await?;
        tracing::info!(sandbox = %connected.sandbox_id, "sandbox connected");
        Ok(connected)
    }

    /// Reset the sandbox's remaining lifetime to `timeout_secs` from now.
    pub async fn set_timeout(&self, sandbox_id: &str, timeout_secs: u64) -> Result<(), RemoteError> {
        let path = format!("/sandboxes/{sandbox_id}/timeout");
        let body = TimeoutBody {
            timeout: timeout_secs,
        };
        self.send(self.request(Method::POST, &path).json(&body))
            .await?;
        Ok(())
    }

    pub async fn kill_sandbox(&self, sandbox_id: &str) -> Result<(), RemoteError> {
        let path = format!("/sandboxes/{sandbox_id}");
        self.send(self.request(Method::DELETE, &path)).await?;
        tracing::info!(sandbox = sandbox_id, "sandbox killed");
        Ok(())
    }

    /// Pause a sandbox. Returns `false` when it was already paused.
    pub async fn pause_sandbox(&self, sandbox_id: &str) -> Result<bool, RemoteError> {
        let path = format!("/sandboxes/{sandbox_id}/pause");
        let response = self
            .request(Method::POST, &path)
            .send()
            .await
            .map_err(crate::http::network_error)?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!(sandbox = sandbox_id, "sandbox already paused");
            return Ok(false);
        }
        crate::http::check_status(response).await?;
        Ok(true)
    }
}

//! A running sandbox: its control plane record plus a daemon client.

use std::sync::Arc;

use sbxctl_common::{RemoteError, SandboxId};

use crate::control::{ApiClient, SandboxCreated, SandboxDetail};
use crate::envd::EnvdClient;

/// How a [`Sandbox`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxMode {
    Create,
    Connect,
}

impl SandboxMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SandboxMode::Create => "create",
            SandboxMode::Connect => "connect",
        }
    }
}

pub struct Sandbox {
    id: SandboxId,
    mode: SandboxMode,
    envd: Arc<EnvdClient>,
}

impl Sandbox {
    /// Start a new sandbox from `template` (id or alias).
    pub async fn create(
        api: &ApiClient,
        template: &str,
        timeout_secs: Option<u64>,
        user: &str,
    ) -> Result<Self, RemoteError> {
        let created = api.create_sandbox(template, timeout_secs).await?;
        Self::attach(api, created, SandboxMode::Create, user)
    }

    /// Connect to an existing sandbox, resuming it if paused. A given timeout
    /// is also applied explicitly so it takes effect on a running sandbox.
    pub async fn connect(
        api: &ApiClient,
        sandbox_id: &str,
        timeout_secs: Option<u64>,
        user: &str,
    ) -> Result<Self, RemoteError> {
        let connected = api.connect_sandbox(sandbox_id, timeout_secs).await?;
        if let Some(timeout) = timeout_secs {
            api.set_timeout(&connected.sandbox_id, timeout).await?;
        }
        Self::attach(api, connected, SandboxMode::Connect, user)
    }

    fn attach(
        api: &ApiClient,
        record: SandboxCreated,
        mode: SandboxMode,
        user: &str,
    ) -> Result<Self, RemoteError> {
        let envd = EnvdClient::new(
            api.config(),
            &record.sandbox_id,
            record.envd_access_token,
            user,
        )?;
        Ok(Self {
            id: SandboxId::new(record.sandbox_id),
            mode,
            envd: Arc::new(envd),
        })
    }

    pub fn id(&self) -> &SandboxId {
        &self.id
    }

    pub fn mode(&self) -> SandboxMode {
        self.mode
    }

    /// Daemon client; also the [`RemotePty`](sbxctl_common::RemotePty) for shells.
    pub fn envd(&self) -> Arc<EnvdClient> {
        self.envd.clone()
    }

    /// Fresh control plane record for this sandbox.
    pub async fn info(&self, api: &ApiClient) -> Result<SandboxDetail, RemoteError> {
        api.get_sandbox(self.id.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(SandboxMode::Create.as_str(), "create");
        assert_eq!(SandboxMode::Connect.as_str(), "connect");
    }
}

//! Process events streamed by `process.Process/Start`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sbxctl_common::RemoteError;
use serde::Deserialize;

/// How a process finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessExit {
    pub exit_code: i32,
    pub exited: bool,
    pub status: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Start { pid: u32 },
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
    Pty(Vec<u8>),
    End(ProcessExit),
    Keepalive,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    event: Option<RawEvent>,
}

#[derive(Default, Deserialize)]
struct RawEvent {
    start: Option<RawStart>,
    data: Option<RawData>,
    end: Option<RawEnd>,
    keepalive: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawStart {
    #[serde(default)]
    pid: u32,
}

#[derive(Deserialize)]
struct RawData {
    stdout: Option<String>,
    stderr: Option<String>,
    pty: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnd {
    #[serde(default)]
    exit_code: i32,
    #[serde(default)]
    exited: bool,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<String>,
}

fn decode(field: &str, b64: &str) -> Result<Vec<u8>, RemoteError> {
    STANDARD
        .decode(b64)
        .map_err(|e| RemoteError::Protocol(format!("invalid base64 in {field} data: {e}")))
}

impl ProcessEvent {
    /// Parse one JSON message. Messages without a recognised event yield `None`.
    pub fn parse(payload: &[u8]) -> Result<Option<Self>, RemoteError> {
        let message: Message = serde_json::from_slice(payload)
            .map_err(|e| RemoteError::Protocol(format!("invalid process event: {e}")))?;
        let event = message.event.unwrap_or_default();

        if let Some(start) = event.start {
            return Ok(Some(Self::Start { pid: start.pid }));
        }
        if let Some(data) = event.data {
            return Ok(match (data.pty, data.stdout, data.stderr) {
                (Some(pty), _, _) => Some(Self::Pty(decode("pty", &pty)?)),
                (None, Some(out), _) => Some(Self::Stdout(decode("stdout", &out)?)),
                (None, None, Some(err)) => Some(Self::Stderr(decode("stderr", &err)?)),
                (None, None, None) => None,
            });
        }
        if let Some(end) = event.end {
            return Ok(Some(Self::End(ProcessExit {
                exit_code: end.exit_code,
                exited: end.exited,
                status: end.status,
                error: end.error.filter(|e| !e.is_empty()),
            })));
        }
        if event.keepalive.is_some() {
            return Ok(Some(Self::Keepalive));
        }
        Ok(None)
    }
}

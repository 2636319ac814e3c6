//! [`RemotePty`] over the process daemon.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sbxctl_common::{OutputSink, PtyHandle, RemoteError, RemotePty, TermSize};
use serde_json::json;

use super::client::EnvdClient;
use super::events::ProcessEvent;

const SHELL: &str = "/bin/bash";
const SHELL_ARGS: [&str; 2] = ["-i", "-l"];

fn pty_start_body(size: TermSize) -> serde_json::Value {
    json!({
        "process": {
            "cmd": SHELL,
            "args": SHELL_ARGS,
            "envs": {
                "TERM": "xterm-256color",
                "LANG": "C.UTF-8",
                "LC_ALL": "C.UTF-8",
            },
        },
        "pty": {
            "size": { "cols": size.cols, "rows": size.rows },
        },
    })
}

fn not_found_as_closed(pid: u32) -> impl Fn(RemoteError) -> RemoteError {
    move |e| match e {
        RemoteError::NotFound(_) => RemoteError::Closed(pid),
        other => other,
    }
}

#[async_trait]
impl RemotePty for EnvdClient {
    async fn create_pty(
        &self,
        size: TermSize,
        timeout: Duration,
    ) -> Result<PtyHandle, RemoteError> {
        let (pid, stream) = self
            .start_process(&pty_start_body(size), Some(timeout))
            .await?;
        tracing::debug!(pid, %size, timeout_secs = timeout.as_secs(), "pty started");

        self.streams
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(pid, stream);

        Ok(PtyHandle {
            id: format!("pty-{pid}"),
            pid,
            size,
        })
    }

    async fn wait_and_stream(
        &self,
        handle: &PtyHandle,
        mut on_output: OutputSink,
    ) -> Result<(), RemoteError> {
        let stream = self
            .streams
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&handle.pid);
        let Some(mut stream) = stream else {
            return Err(RemoteError::Closed(handle.pid));
        };

        while let Some(event) = stream.next_event().await? {
            match event {
                ProcessEvent::Pty(data) | ProcessEvent::Stdout(data) | ProcessEvent::Stderr(data) => {
                    on_output(&data);
                }
                ProcessEvent::End(exit) => {
                    tracing::debug!(
                        pid = handle.pid,
                        exit_code = exit.exit_code,
                        status = %exit.status,
                        "pty process ended"
                    );
                    return Ok(());
                }
                ProcessEvent::Start { .. } | ProcessEvent::Keepalive => {}
            }
        }
        Ok(())
    }

    async fn send_stdin(&self, handle: &PtyHandle, data: &[u8]) -> Result<(), RemoteError> {
        let body = json!({
            "process": { "pid": handle.pid },
            "input": { "pty": STANDARD.encode(data) },
        });
        self.unary("/process.Process/SendInput", &body)
            .await
            .map_err(not_found_as_closed(handle.pid))
    }

    async fn resize(&self, handle: &PtyHandle, size: TermSize) -> Result<(), RemoteError> {
        let body = json!({
            "process": { "pid": handle.pid },
            "pty": { "size": { "cols": size.cols, "rows": size.rows } },
        });
        self.unary("/process.Process/Update", &body)
            .await
            .map_err(not_found_as_closed(handle.pid))
    }

    async fn release(&self, handle: &PtyHandle) {
        let parked = self
            .streams
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&handle.pid);
        if parked.is_some() {
            tracing::debug!(pid = handle.pid, "dropped unstreamed pty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_body_requests_login_shell_with_size() {
        let body = pty_start_body(TermSize::new(40, 120));
        assert_eq!(body["process"]["cmd"], "/bin/bash");
        assert_eq!(body["process"]["args"], json!(["-i", "-l"]));
        assert_eq!(body["process"]["envs"]["TERM"], "xterm-256color");
        assert_eq!(body["pty"]["size"]["cols"], 120);
        assert_eq!(body["pty"]["size"]["rows"], 40);
    }

    #[test]
    fn missing_process_means_closed() {
        let map = not_found_as_closed(12);
        assert!(matches!(
            map(RemoteError::NotFound("process".into())),
            RemoteError::Closed(12)
        ));
        assert!(matches!(
            map(RemoteError::Network("reset".into())),
            RemoteError::Network(_)
        ));
    }

    #[tokio::test]
    async fn release_drops_parked_stream() {
        let client =
            EnvdClient::new(&sbxctl_config::ApiConfig::default(), "sbx", None, "user").unwrap();
        client
            .streams
            .lock()
            .unwrap()
            .insert(9, crate::envd::ProcessStream::from_frames(Vec::new()));
        let handle = PtyHandle {
            id: "pty-9".into(),
            pid: 9,
            size: TermSize::default(),
        };

        client.release(&handle).await;

        assert!(client.streams.lock().unwrap().is_empty());
        let err = client
            .wait_and_stream(&handle, Box::new(|_| {}))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Closed(9)));
    }

    #[tokio::test]
    async fn streaming_unknown_pty_is_closed() {
        let client =
            EnvdClient::new(&sbxctl_config::ApiConfig::default(), "sbx", None, "user").unwrap();
        let handle = PtyHandle {
            id: "pty-5".into(),
            pid: 5,
            size: TermSize::default(),
        };
        let err = client
            .wait_and_stream(&handle, Box::new(|_| {}))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Closed(5)));
    }
}

//! One-shot command execution.

use serde_json::json;
use sbxctl_common::RemoteError;

use super::client::EnvdClient;
use super::events::ProcessEvent;

/// Output and outcome of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Error reported by the daemon, e.g. when the command could not start.
    pub error: Option<String>,
}

/// Quote `s` as a single POSIX shell word.
pub fn shell_quote(s: &str) -> String {
    if !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_./=:,+@%".contains(&b))
    {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

impl EnvdClient {
    /// Run `cmd` through a login bash and collect its output.
    ///
    /// A non-zero exit is not an error; it is reported in the result.
    pub async fn run_command(&self, cmd: &str) -> Result<CommandResult, RemoteError> {
        let body = json!({
            "process": {
                "cmd": "/bin/bash",
                "args": ["-l", "-c", cmd],
                "envs": {},
            },
            "stdin": false,
        });

        let (pid, mut stream) = self.start_process(&body, None).await?;
        tracing::debug!(pid, cmd, "command started");

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut result = CommandResult::default();
        let mut ended = false;

        while let Some(event) = stream.next_event().await? {
            match event {
                ProcessEvent::Stdout(data) | ProcessEvent::Pty(data) => {
                    stdout.extend_from_slice(&data)
                }
                ProcessEvent::Stderr(data) => stderr.extend_from_slice(&data),
                ProcessEvent::End(exit) => {
                    result.exit_code = exit.exit_code;
                    result.error = exit.error;
                    ended = true;
                    break;
                }
                ProcessEvent::Start { .. } | ProcessEvent::Keepalive => {}
            }
        }

        if !ended {
            return Err(RemoteError::Process(format!(
                "command stream for pid {pid} ended without an exit status"
            )));
        }

        result.stdout = String::from_utf8_lossy(&stdout).into_owned();
        result.stderr = String::from_utf8_lossy(&stderr).into_owned();
        tracing::debug!(pid, exit_code = result.exit_code, "command finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_are_not_quoted() {
        assert_eq!(shell_quote("/tmp/main.py"), "/tmp/main.py");
    }

    #[test]
    fn spaces_and_quotes_are_quoted() {
        assert_eq!(shell_quote("print('hi')"), r#"'print('"'"'hi'"'"')'"#);
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote(""), "''");
    }
}

//! Bridge session types: lifecycle states, options, outcome, errors.

use std::time::Duration;

use sbxctl_common::{PtyHandle, RemoteError, TermSize};
use sbxctl_config::BridgeConfig;

// =============================================================================
// STATE
// =============================================================================

/// Lifecycle of one terminal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Probing size, creating the remote PTY, entering raw mode.
    Initializing,
    /// Both relays running.
    Attached,
    /// One relay stopped; waiting for the other to wind down.
    Draining,
    /// Local terminal mode and resize handler restored.
    Closed,
}

/// Why the attached phase ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The remote output stream ended normally.
    RemoteClosed,
    /// The remote output stream failed.
    RemoteFailed(String),
    /// Local input reached end-of-file.
    LocalEof,
    /// Reading local input or forwarding it to the remote PTY failed.
    InputFailed(String),
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Tuning for a bridge session.
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    /// How long the outbound relay waits for input before re-checking liveness.
    pub poll_interval: Duration,
    /// Upper bound on waiting for the inbound relay during teardown.
    pub join_timeout: Duration,
    /// Size used when the local terminal cannot be measured.
    pub default_size: TermSize,
    /// Lifetime budget passed to the remote PTY creation.
    pub pty_timeout: Duration,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            join_timeout: Duration::from_secs(1),
            default_size: TermSize::default(),
            pty_timeout: Duration::from_secs(60 * 60),
        }
    }
}

impl BridgeOptions {
    pub fn from_config(config: &BridgeConfig, pty_timeout: Duration) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            join_timeout: Duration::from_millis(config.join_timeout_ms),
            default_size: TermSize::new(config.default_rows, config.default_cols)
                .or(TermSize::default()),
            pty_timeout,
        }
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Summary of a finished session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub handle: PtyHandle,
    pub state: SessionState,
    pub end: SessionEnd,
    /// Bytes forwarded from local input to the remote PTY.
    pub bytes_in: u64,
    /// Bytes written to local output from the remote PTY.
    pub bytes_out: u64,
    /// Number of resize calls sent to the remote PTY.
    pub resizes: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to create remote PTY: {0}")]
    CreatePty(#[source] RemoteError),

    #[error("failed to start input relay: {0}")]
    Spawn(#[source] std::io::Error),
}

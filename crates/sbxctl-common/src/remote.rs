//! The four PTY operations the terminal bridge consumes from the remote
//! execution service.

use std::time::Duration;

use async_trait::async_trait;

use crate::{PtyHandle, RemoteError, TermSize};

/// Receives PTY output chunks in the order the service produced them.
pub type OutputSink = Box<dyn FnMut(&[u8]) + Send>;

#[async_trait]
pub trait RemotePty: Send + Sync {
    /// Start a PTY process of the given size. `timeout` bounds its lifetime.
    async fn create_pty(&self, size: TermSize, timeout: Duration)
        -> Result<PtyHandle, RemoteError>;

    /// Stream output into `on_output` until the PTY closes or the stream errors.
    async fn wait_and_stream(
        &self,
        handle: &PtyHandle,
        on_output: OutputSink,
    ) -> Result<(), RemoteError>;

    /// Write bytes to the PTY's stdin.
    async fn send_stdin(&self, handle: &PtyHandle, data: &[u8]) -> Result<(), RemoteError>;

    /// Push a new terminal size.
    async fn resize(&self, handle: &PtyHandle, size: TermSize) -> Result<(), RemoteError>;

    /// Drop anything held for a PTY whose output will never be streamed.
    async fn release(&self, _handle: &PtyHandle) {}
}

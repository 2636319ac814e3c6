//! The two relay activities and resize propagation.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sbxctl_common::{PtyHandle, RemoteError, RemotePty, TermSize};
use tokio::sync::mpsc;

use crate::input::{InputEvent, InputSource};
use crate::local::LocalTerminal;

/// Buffered input chunks between the stdin thread and the forwarding loop.
pub(super) const INPUT_QUEUE_DEPTH: usize = 64;

// =============================================================================
// INBOUND (REMOTE -> STDOUT)
// =============================================================================

/// Stream remote PTY output into `output`, flushing after every chunk.
///
/// Runs until the remote side closes the stream or it fails. Local write
/// errors are logged once and further output is discarded, so the stream is
/// still drained to its end.
pub(super) async fn inbound(
    remote: Arc<dyn RemotePty>,
    handle: PtyHandle,
    mut output: Box<dyn Write + Send>,
    bytes_out: Arc<AtomicU64>,
) -> Result<(), RemoteError> {
    let mut broken = false;
    let sink = Box::new(move |chunk: &[u8]| {
        if broken {
            return;
        }
        let result = output.write_all(chunk).and_then(|()| output.flush());
        match result {
            Ok(()) => {
                bytes_out.fetch_add(chunk.len() as u64, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::warn!(error = %e, "local output closed; discarding remote output");
                broken = true;
            }
        }
    });

    remote.wait_and_stream(&handle, sink).await
}

// =============================================================================
// OUTBOUND (STDIN -> REMOTE)
// =============================================================================

/// Spawn the thread that polls local input and queues it for forwarding.
///
/// The thread checks `alive` after every poll and exits once it is cleared.
/// End-of-input closes the queue; a read error is queued and ends the thread.
pub(super) fn spawn_input_reader(
    mut input: Box<dyn InputSource>,
    alive: Arc<AtomicBool>,
    poll_interval: Duration,
    tx: mpsc::Sender<io::Result<Vec<u8>>>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("sbx-stdin".to_string())
        .spawn(move || {
            while alive.load(Ordering::SeqCst) {
                match input.poll_input(poll_interval) {
                    Ok(InputEvent::Idle) => continue,
                    Ok(InputEvent::Data(bytes)) => {
                        if !alive.load(Ordering::SeqCst) || tx.blocking_send(Ok(bytes)).is_err() {
                            break;
                        }
                    }
                    Ok(InputEvent::Eof) => {
                        tracing::debug!("local input closed");
                        break;
                    }
                    Err(e) => {
                        let _ = tx.blocking_send(Err(e));
                        break;
                    }
                }
            }
        })
}

// =============================================================================
// RESIZE
// =============================================================================

/// Re-measure the local terminal and push the size if it changed.
///
/// Returns `true` when a resize was sent. Failures are logged and leave
/// `current` untouched so the next notification retries.
pub(super) async fn propagate_resize(
    remote: &dyn RemotePty,
    handle: &PtyHandle,
    terminal: &dyn LocalTerminal,
    current: &mut TermSize,
) -> bool {
    let measured = match terminal.size() {
        Ok(size) if size.is_valid() => size,
        Ok(_) => return false,
        Err(e) => {
            tracing::debug!(error = %e, "could not measure terminal after resize");
            return false;
        }
    };

    if measured == *current {
        return false;
    }

    match remote.resize(handle, measured).await {
        Ok(()) => {
            tracing::debug!(pid = handle.pid, from = %current, to = %measured, "pty resized");
            *current = measured;
            true
        }
        Err(e) => {
            tracing::warn!(pid = handle.pid, error = %e, "pty resize failed");
            false
        }
    }
}

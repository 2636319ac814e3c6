//! The terminal session: setup, the attached select loop, and teardown.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use sbxctl_common::RemotePty;
use tokio::sync::mpsc;

use super::relay::{self, INPUT_QUEUE_DEPTH};
use super::types::{BridgeError, BridgeOptions, SessionEnd, SessionReport, SessionState};
use crate::input::InputSource;
use crate::local::{LocalTerminal, RawModeGuard};
use crate::resize::{ResizeGuard, ResizeNotifier};
use crate::size::probe_size;

/// Attaches the local terminal to a freshly created remote PTY.
///
/// A bridge runs exactly once. [`TerminalBridge::run`] returns after the
/// session has reached [`SessionState::Closed`], with the local terminal mode
/// and the resize handler restored regardless of how the session ended.
pub struct TerminalBridge {
    remote: Arc<dyn RemotePty>,
    terminal: Arc<dyn LocalTerminal>,
    input: Box<dyn InputSource>,
    output: Box<dyn Write + Send>,
    resize: Box<dyn ResizeNotifier>,
    options: BridgeOptions,
}

impl TerminalBridge {
    /// Bridge the process's own terminal: crossterm for mode and size,
    /// polled stdin, stdout, and SIGWINCH.
    #[cfg(unix)]
    pub fn new(remote: Arc<dyn RemotePty>, options: BridgeOptions) -> Self {
        Self::from_parts(
            remote,
            Arc::new(crate::local::CrosstermTerminal),
            Box::new(crate::input::StdinSource::new()),
            Box::new(io::stdout()),
            Box::new(crate::resize::SignalResizeNotifier::new()),
            options,
        )
    }

    pub fn from_parts(
        remote: Arc<dyn RemotePty>,
        terminal: Arc<dyn LocalTerminal>,
        input: Box<dyn InputSource>,
        output: Box<dyn Write + Send>,
        resize: Box<dyn ResizeNotifier>,
        options: BridgeOptions,
    ) -> Self {
        Self {
            remote,
            terminal,
            input,
            output,
            resize,
            options,
        }
    }

    /// Run the session to completion.
    ///
    /// Fails only when the remote PTY cannot be created, in which case the
    /// local terminal has not been touched. Every later failure ends the
    /// session normally and is reported in [`SessionReport::end`].
    pub async fn run(self) -> Result<SessionReport, BridgeError> {
        let Self {
            remote,
            terminal,
            input,
            output,
            mut resize,
            options,
        } = self;

        // --- Initializing ---
        let mut state = SessionState::Initializing;
        let mut current = probe_size(terminal.as_ref(), options.default_size);
        tracing::debug!(?state, size = %current, "creating remote pty");

        let handle = remote
            .create_pty(current, options.pty_timeout)
            .await
            .map_err(BridgeError::CreatePty)?;
        tracing::info!(pty = %handle.id, pid = handle.pid, size = %current, "remote pty created");

        let raw_guard = RawModeGuard::enter(terminal.clone());
        let (resize_tx, mut resize_rx) = mpsc::unbounded_channel();
        let resize_guard = ResizeGuard::install(resize.as_mut(), resize_tx);
        let resize_enabled = resize_guard.is_installed();

        let alive = Arc::new(AtomicBool::new(true));
        let bytes_out = Arc::new(AtomicU64::new(0));

        let mut inbound = tokio::spawn(relay::inbound(
            remote.clone(),
            handle.clone(),
            output,
            bytes_out.clone(),
        ));

        let (input_tx, mut input_rx) = mpsc::channel::<io::Result<Vec<u8>>>(INPUT_QUEUE_DEPTH);
        let reader = match relay::spawn_input_reader(
            input,
            alive.clone(),
            options.poll_interval,
            input_tx,
        ) {
            Ok(reader) => reader,
            Err(e) => {
                inbound.abort();
                let _ = (&mut inbound).await;
                remote.release(&handle).await;
                return Err(BridgeError::Spawn(e));
            }
        };

        // --- Attached ---
        state = SessionState::Attached;
        tracing::debug!(?state, raw = raw_guard.is_active(), resize = resize_enabled);

        let mut bytes_in: u64 = 0;
        let mut resizes: u32 = 0;
        let mut inbound_done = false;

        let end = loop {
            tokio::select! {
                result = &mut inbound => {
                    inbound_done = true;
                    break match result {
                        Ok(Ok(())) => SessionEnd::RemoteClosed,
                        Ok(Err(e)) => {
                            tracing::warn!(pid = handle.pid, error = %e, "remote output stream failed");
                            SessionEnd::RemoteFailed(e.to_string())
                        }
                        Err(e) => SessionEnd::RemoteFailed(e.to_string()),
                    };
                }
                msg = input_rx.recv() => match msg {
                    Some(Ok(bytes)) => {
                        if let Err(e) = remote.send_stdin(&handle, &bytes).await {
                            tracing::warn!(pid = handle.pid, error = %e, "forwarding input failed");
                            break SessionEnd::InputFailed(e.to_string());
                        }
                        bytes_in += bytes.len() as u64;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "reading local input failed");
                        break SessionEnd::InputFailed(e.to_string());
                    }
                    None => break SessionEnd::LocalEof,
                },
                Some(()) = resize_rx.recv(), if resize_enabled => {
                    if relay::propagate_resize(remote.as_ref(), &handle, terminal.as_ref(), &mut current).await {
                        resizes += 1;
                    }
                }
            }
        };

        // --- Draining ---
        state = SessionState::Draining;
        tracing::debug!(?state, ?end);
        alive.store(false, Ordering::SeqCst);
        drop(input_rx);

        if !inbound_done {
            match tokio::time::timeout(options.join_timeout, &mut inbound).await {
                Ok(Ok(Err(e))) => {
                    tracing::debug!(error = %e, "remote output stream ended with error while draining");
                }
                Ok(_) => {}
                Err(_) => {
                    tracing::debug!(
                        timeout_ms = options.join_timeout.as_millis() as u64,
                        "remote output still open; detaching"
                    );
                    inbound.abort();
                    let _ = (&mut inbound).await;
                }
            }
        }

        match tokio::task::spawn_blocking(move || reader.join()).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => tracing::warn!("input relay thread panicked"),
            Err(e) => tracing::warn!(error = %e, "failed to join input relay"),
        }

        // --- Closed ---
        drop(resize_guard);
        drop(raw_guard);
        state = SessionState::Closed;
        tracing::info!(pty = %handle.id, ?end, bytes_in, bytes_out = bytes_out.load(Ordering::Relaxed), "session closed");

        Ok(SessionReport {
            handle,
            state,
            end,
            bytes_in,
            bytes_out: bytes_out.load(Ordering::Relaxed),
            resizes,
        })
    }
}

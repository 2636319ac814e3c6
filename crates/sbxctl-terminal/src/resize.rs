//! Window-size change notifications.

use std::io;

use tokio::sync::mpsc;

/// Delivers a notification every time the local terminal is resized.
pub trait ResizeNotifier: Send {
    /// Start sending `()` on `tx` for each resize.
    fn install(&mut self, tx: mpsc::UnboundedSender<()>) -> io::Result<()>;

    /// Remove the handler added by `install`, restoring the previous disposition.
    fn uninstall(&mut self);
}

// =============================================================================
// GUARD
// =============================================================================

/// Keeps a notifier installed until dropped. Installation failures are
/// logged and leave the guard inert.
pub struct ResizeGuard<'a> {
    notifier: &'a mut dyn ResizeNotifier,
    installed: bool,
}

impl<'a> ResizeGuard<'a> {
    pub fn install(notifier: &'a mut dyn ResizeNotifier, tx: mpsc::UnboundedSender<()>) -> Self {
        let installed = match notifier.install(tx) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "resize notifications unavailable");
                false
            }
        };
        Self {
            notifier,
            installed,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }
}

impl Drop for ResizeGuard<'_> {
    fn drop(&mut self) {
        if self.installed {
            self.notifier.uninstall();
        }
    }
}

// =============================================================================
// SIGWINCH
// =============================================================================

/// SIGWINCH delivered through a signal-hook iterator thread.
///
/// signal-hook chains onto whatever handler was present, and dropping the
/// `Signals` instance unregisters ours, so the previous disposition is back
/// in effect after `uninstall`.
#[cfg(unix)]
#[derive(Default)]
pub struct SignalResizeNotifier {
    handle: Option<signal_hook::iterator::Handle>,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(unix)]
impl ResizeNotifier for SignalResizeNotifier {
    fn install(&mut self, tx: mpsc::UnboundedSender<()>) -> io::Result<()> {
        use signal_hook::consts::SIGWINCH;
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGWINCH])?;
        self.handle = Some(signals.handle());

        let thread = std::thread::Builder::new()
            .name("sbx-sigwinch".to_string())
            .spawn(move || {
                for _ in signals.forever() {
                    if tx.send(()).is_err() {
                        break;
                    }
                }
            })?;
        self.thread = Some(thread);
        Ok(())
    }

    fn uninstall(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.close();
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::debug!("sigwinch thread panicked");
            }
        }
    }
}

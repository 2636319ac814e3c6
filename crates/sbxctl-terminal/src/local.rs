//! Local terminal control: size, tty detection, raw mode.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use sbxctl_common::TermSize;

/// The local terminal device the bridge drives.
///
/// Methods take `&self` because terminal mode is process-global state; the
/// bridge shares one instance between setup, resize handling, and teardown.
pub trait LocalTerminal: Send + Sync {
    /// Current size in character cells.
    fn size(&self) -> io::Result<TermSize>;

    /// Whether stdin is attached to a terminal.
    fn is_tty(&self) -> bool;

    /// Save the current mode and switch to raw mode.
    fn enter_raw_mode(&self) -> io::Result<()>;

    /// Restore the mode saved by `enter_raw_mode`.
    fn restore_mode(&self) -> io::Result<()>;
}

/// The process's controlling terminal, via crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl LocalTerminal for CrosstermTerminal {
    fn size(&self) -> io::Result<TermSize> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(TermSize::new(rows, cols))
    }

    fn is_tty(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn enter_raw_mode(&self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()
    }

    fn restore_mode(&self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }
}

// =============================================================================
// RAW MODE GUARD
// =============================================================================

/// Holds the terminal in raw mode until dropped.
///
/// Entering raw mode is best-effort: a non-tty stdin or a failing `termios`
/// call leaves the terminal untouched and the guard inactive.
pub struct RawModeGuard {
    terminal: Arc<dyn LocalTerminal>,
    active: bool,
}

impl RawModeGuard {
    pub fn enter(terminal: Arc<dyn LocalTerminal>) -> Self {
        if !terminal.is_tty() {
            tracing::debug!("stdin is not a tty; staying in cooked mode");
            return Self {
                terminal,
                active: false,
            };
        }

        let active = match terminal.enter_raw_mode() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to enable raw mode; continuing without it");
                false
            }
        };

        Self { terminal, active }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.terminal.restore_mode() {
                tracing::warn!(error = %e, "failed to restore terminal mode");
            }
        }
    }
}

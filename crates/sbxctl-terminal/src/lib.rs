//! Interactive bridge between the local terminal and a remote PTY.
//!
//! # Architecture
//!
//! - [`LocalTerminal`]: size probing and raw-mode control of the local tty.
//! - [`InputSource`]: timed polling of local input, so relays can observe
//!   shutdown without blocking forever in `read`.
//! - [`ResizeNotifier`]: delivery of window-size changes (SIGWINCH on Unix).
//! - [`TerminalBridge`]: the session itself. Creates the remote PTY, runs the
//!   inbound (remote -> stdout) and outbound (stdin -> remote) relays, and
//!   restores local state on every exit path.

pub mod bridge;
pub mod input;
pub mod local;
pub mod resize;
pub mod size;

pub use bridge::{BridgeError, BridgeOptions, SessionEnd, SessionReport, SessionState, TerminalBridge};
pub use input::{InputEvent, InputSource};
pub use local::{CrosstermTerminal, LocalTerminal, RawModeGuard};
pub use resize::{ResizeGuard, ResizeNotifier};
pub use size::probe_size;

#[cfg(unix)]
pub use input::StdinSource;
#[cfg(unix)]
pub use resize::SignalResizeNotifier;

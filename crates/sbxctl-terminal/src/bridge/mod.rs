//! Terminal session bridging the local tty and a remote PTY.
//!
//! # Lifecycle
//!
//! ```text
//! Initializing -> Attached -> Draining -> Closed
//! ```
//!
//! The remote PTY is created before any local state changes, so a failed
//! creation leaves the terminal exactly as it was. Once attached, remote
//! output is pushed to stdout by a tokio task while a dedicated thread polls
//! stdin. Whichever side stops first ends the session; the other is given
//! `join_timeout` to finish before it is cancelled.

mod relay;
mod session;
mod types;

pub use session::TerminalBridge;
pub use types::{BridgeError, BridgeOptions, SessionEnd, SessionReport, SessionState};

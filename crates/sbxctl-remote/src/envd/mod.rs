//! In-sandbox process daemon: processes, PTYs, and files.

mod client;
mod commands;
pub mod envelope;
mod events;
mod files;
mod pty;

pub use client::{EnvdClient, ProcessStream};
pub use commands::{shell_quote, CommandResult};
pub use events::{ProcessEvent, ProcessExit};

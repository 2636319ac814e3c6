//! Clients for the remote sandbox service.
//!
//! Two planes are involved:
//!
//! - [`control`]: the REST API at `https://api.<domain>` that manages
//!   templates and sandbox lifecycles (authenticated with `X-API-Key`).
//! - [`envd`]: the process daemon inside each sandbox, spoken to over the
//!   Connect protocol. [`EnvdClient`] implements
//!   [`RemotePty`](sbxctl_common::RemotePty) for the terminal bridge.
//!
//! [`Sandbox`] ties the two together for one running sandbox.

pub mod control;
pub mod envd;
mod http;
pub mod sandbox;

pub use control::{ApiClient, SandboxCreated, SandboxDetail, SandboxListItem, TemplateInfo};
pub use envd::{CommandResult, EnvdClient, ProcessEvent, ProcessExit};
pub use sandbox::{Sandbox, SandboxMode};

//! Control plane: templates and sandbox lifecycle over REST.

mod client;
mod sandboxes;
mod templates;
mod types;

pub use client::ApiClient;
pub use sandboxes::DEFAULT_SANDBOX_TIMEOUT_SECS;
pub use templates::{looks_like_template_id, resolve_alias};
pub use types::{SandboxCreated, SandboxDetail, SandboxListItem, TemplateInfo};

use serde::{Deserialize, Serialize};

/// Log filter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `sbxctl=debug`.
    pub level: Option<String>,
}

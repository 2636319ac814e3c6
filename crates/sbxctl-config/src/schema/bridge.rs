//! Interactive shell bridge tuning.

use serde::{Deserialize, Serialize};

/// Timing and geometry defaults for the terminal bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// How long the stdin relay waits for input before re-checking liveness.
    pub poll_interval_ms: u64,
    /// Upper bound on waiting for remote output to finish after a relay stops.
    pub join_timeout_ms: u64,
    /// Rows used when the local terminal size cannot be determined.
    pub default_rows: u16,
    /// Columns used when the local terminal size cannot be determined.
    pub default_cols: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            join_timeout_ms: 1000,
            default_rows: 24,
            default_cols: 80,
        }
    }
}

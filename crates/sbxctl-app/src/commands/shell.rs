//! `--shell`: attach the local terminal to a login shell in the sandbox.

use std::sync::Arc;

use sbxctl_common::SbxError;
use sbxctl_config::SbxConfig;
use sbxctl_remote::EnvdClient;
use sbxctl_terminal::SessionEnd;

#[cfg(unix)]
pub async fn enter(envd: Arc<EnvdClient>, config: &SbxConfig, minutes: u32) -> Result<i32, SbxError> {
    use std::time::Duration;

    use sbxctl_terminal::{BridgeOptions, TerminalBridge};

    let options = BridgeOptions::from_config(
        &config.bridge,
        Duration::from_secs(u64::from(minutes) * 60),
    );
    let report = TerminalBridge::new(envd, options)
        .run()
        .await
        .map_err(|e| SbxError::Terminal(e.to_string()))?;

    report_end(&report.end);
    tracing::debug!(
        bytes_in = report.bytes_in,
        bytes_out = report.bytes_out,
        resizes = report.resizes,
        "shell detached"
    );
    Ok(0)
}

#[cfg(not(unix))]
pub async fn enter(_envd: Arc<EnvdClient>, _config: &SbxConfig, _minutes: u32) -> Result<i32, SbxError> {
    Err(SbxError::Terminal(
        "interactive shells require a Unix terminal".into(),
    ))
}

/// Print why the session ended when it was not a clean close.
#[cfg_attr(not(unix), allow(dead_code))]
fn report_end(end: &SessionEnd) {
    match end {
        SessionEnd::RemoteFailed(e) => eprintln!("\nPTY ended: {e}"),
        SessionEnd::InputFailed(e) => eprintln!("\nSending input failed: {e}"),
        SessionEnd::RemoteClosed | SessionEnd::LocalEof => {}
    }
}

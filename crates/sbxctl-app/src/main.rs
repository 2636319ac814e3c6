mod cli;
mod commands;
mod format;

use std::process::ExitCode;

use sbxctl_common::SbxError;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "sbxctl=warn";

/// Turn a bare level into a directive scoped to this workspace's crates.
fn log_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("sbxctl={level}")
    }
}

/// `--log-level` wins, then `RUST_LOG`, then the config file, then the default.
fn build_filter(flag: Option<&str>, configured: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::new(DEFAULT_LOG_DIRECTIVE);

    if let Some(level) = flag {
        return EnvFilter::try_new(log_directive(level)).unwrap_or_else(|_| fallback());
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match configured {
        Some(level) => EnvFilter::try_new(log_directive(level)).unwrap_or_else(|_| fallback()),
        None => fallback(),
    }
}

/// Process status for a remote exit code, truncated to its low byte
/// (`-1` becomes 255, `256` becomes 0).
fn exit_status(code: i32) -> u8 {
    (code & 0xff) as u8
}

fn report(err: &SbxError) {
    match err {
        SbxError::Usage(msg) => eprintln!("{msg}"),
        other => eprintln!("Error: {other}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env in the working directory overrides the inherited environment.
    if let Ok(cwd) = std::env::current_dir() {
        sbxctl_config::env::load_dotenv(&cwd);
    }

    let args = cli::parse();

    let config = sbxctl_config::load_config(args.config.as_deref());

    let configured_level = config
        .as_ref()
        .ok()
        .and_then(|c| c.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(
            args.log_level.as_deref(),
            configured_level.as_deref(),
        ))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("sbxctl v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            report(&SbxError::Config(e));
            return ExitCode::FAILURE;
        }
    };

    if config.api.api_key.as_deref().map_or(true, str::is_empty) {
        eprintln!("E2B_API_KEY not set");
        return ExitCode::FAILURE;
    }

    match commands::run(&args, &config).await {
        Ok(code) => ExitCode::from(exit_status(code)),
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels_are_scoped() {
        assert_eq!(log_directive("debug"), "sbxctl=debug");
        assert_eq!(log_directive("sbxctl_remote=trace"), "sbxctl_remote=trace");
        assert_eq!(log_directive("warn,reqwest=debug"), "warn,reqwest=debug");
    }

    #[test]
    fn exit_status_keeps_the_low_byte() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(1), 1);
        assert_eq!(exit_status(127), 127);
        assert_eq!(exit_status(-1), 255);
        assert_eq!(exit_status(256), 0);
    }
}

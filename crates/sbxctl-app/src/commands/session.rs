//! Create or connect to a sandbox, then run the requested follow-up.

use sbxctl_common::SbxError;
use sbxctl_config::SbxConfig;
use sbxctl_remote::{ApiClient, Sandbox};

use super::{exec, sandbox_timeout_secs, shell, upload};
use crate::cli::{Args, FollowUp};

pub async fn connect(
    api: &ApiClient,
    args: &Args,
    config: &SbxConfig,
    id: &str,
) -> Result<i32, SbxError> {
    let minutes = args.minutes.or(config.sandbox.minutes);
    let timeout = sandbox_timeout_secs(minutes, args.shell, config.sandbox.shell_minutes);
    let sandbox = Sandbox::connect(api, id, timeout, &config.sandbox.user).await?;
    attached(api, args, config, &sandbox, minutes).await
}

/// Default action: reconnect when `--sandbox-id` is given, else create from
/// `--alias` (or the configured default template).
pub async fn create_or_reconnect(
    api: &ApiClient,
    args: &Args,
    config: &SbxConfig,
) -> Result<i32, SbxError> {
    let minutes = args.minutes.or(config.sandbox.minutes);
    let timeout = sandbox_timeout_secs(minutes, args.shell, config.sandbox.shell_minutes);
    let user = &config.sandbox.user;

    let sandbox = match args.sandbox_id.as_deref() {
        Some(id) => Sandbox::connect(api, id, timeout, user).await?,
        None => {
            let template = args
                .alias
                .as_deref()
                .or(config.sandbox.default_template.as_deref())
                .ok_or_else(|| {
                    SbxError::Usage(
                        "Requires alias parameter. Usage: --alias=<template_alias> [--shell] [--minutes=N]"
                            .into(),
                    )
                })?;
            Sandbox::create(api, template, timeout, user).await?
        }
    };

    attached(api, args, config, &sandbox, minutes).await
}

fn mode_line(mode: &str, id: &str, template: &str, minutes: Option<u32>, end_at: &str) -> String {
    let minutes = minutes.map(|m| m.to_string()).unwrap_or_default();
    format!("mode:{mode} id:{id} template:{template} minutes:{minutes} endAt:{end_at}")
}

async fn attached(
    api: &ApiClient,
    args: &Args,
    config: &SbxConfig,
    sandbox: &Sandbox,
    minutes: Option<u32>,
) -> Result<i32, SbxError> {
    let info = sandbox.info(api).await?;
    println!(
        "{}",
        mode_line(
            sandbox.mode().as_str(),
            sandbox.id().as_str(),
            info.alias.as_deref().unwrap_or(""),
            minutes,
            &info.end_at.to_rfc3339(),
        )
    );

    let envd = sandbox.envd();

    if !args.upload.is_empty() {
        upload::upload_files(&envd, &args.upload, &config.sandbox.home_dir()).await;
    }

    match args.follow_up() {
        FollowUp::Shell => {
            let pty_minutes = minutes.unwrap_or(config.sandbox.shell_minutes);
            shell::enter(envd, config, pty_minutes).await
        }
        FollowUp::Code(code) => Ok(exec::execute_code(&envd, code).await),
        FollowUp::File(path) => Ok(exec::execute_file(&envd, path).await),
        FollowUp::Command(command) => Ok(exec::execute_command(&envd, command).await),
        FollowUp::Nothing => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_line_with_and_without_minutes() {
        assert_eq!(
            mode_line("create", "iq3", "sbx-world", Some(30), "2025-01-02T04:04:05+00:00"),
            "mode:create id:iq3 template:sbx-world minutes:30 endAt:2025-01-02T04:04:05+00:00"
        );
        assert_eq!(
            mode_line("connect", "iq3", "", None, "x"),
            "mode:connect id:iq3 template: minutes: endAt:x"
        );
    }
}

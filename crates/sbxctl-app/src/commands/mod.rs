//! Command dispatch. Every handler returns the process exit code.

mod exec;
mod sandboxes;
mod session;
mod shell;
mod templates;
mod upload;

use sbxctl_common::SbxError;
use sbxctl_config::SbxConfig;
use sbxctl_remote::ApiClient;

use crate::cli::{Action, Args};

/// Run the action selected by `args`.
pub async fn run(args: &Args, config: &SbxConfig) -> Result<i32, SbxError> {
    let api = ApiClient::new(&config.api)?;

    match args.action() {
        Action::ListTemplates => templates::list(&api).await,
        Action::DeleteTemplate => {
            let target = args.template_ref().ok_or_else(|| {
                SbxError::Usage("Requires --id, --template-id or --alias parameter".into())
            })?;
            templates::delete(&api, target).await
        }
        Action::List => sandboxes::list(&api).await,
        Action::Info => sandboxes::info(&api, require_id(args)?).await,
        Action::Kill => sandboxes::kill(&api, require_id(args)?).await,
        Action::Pause => sandboxes::pause(&api, require_id(args)?).await,
        Action::Resume => sandboxes::resume(&api, require_id(args)?).await,
        Action::Connect => {
            let id = args.sandbox_ref().ok_or_else(|| {
                SbxError::Usage("Usage: --connect --id=<sandboxID> [--shell] [--minutes=N]".into())
            })?;
            session::connect(&api, args, config, id).await
        }
        Action::Create => session::create_or_reconnect(&api, args, config).await,
    }
}

fn require_id(args: &Args) -> Result<&str, SbxError> {
    args.sandbox_ref()
        .ok_or_else(|| SbxError::Usage("Requires --id parameter".into()))
}

/// Sandbox timeout in seconds: explicit minutes first, then the interactive
/// default when a shell was requested, otherwise the service default.
pub(crate) fn sandbox_timeout_secs(minutes: Option<u32>, shell: bool, shell_minutes: u32) -> Option<u64> {
    match minutes {
        Some(m) => Some(u64::from(m) * 60),
        None if shell => Some(u64::from(shell_minutes) * 60),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_win() {
        assert_eq!(sandbox_timeout_secs(Some(15), true, 60), Some(900));
    }

    #[test]
    fn shell_defaults_to_an_hour() {
        assert_eq!(sandbox_timeout_secs(None, true, 60), Some(3600));
    }

    #[test]
    fn otherwise_service_default() {
        assert_eq!(sandbox_timeout_secs(None, false, 60), None);
    }
}

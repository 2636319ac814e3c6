use std::path::PathBuf;

use clap::Parser;

/// sbxctl: manage remote sandboxes and attach to them interactively.
#[derive(Parser, Debug, Default)]
#[command(name = "sbxctl", version, about)]
pub struct Args {
    /// List all templates.
    #[arg(long)]
    pub list_templates: bool,

    /// Delete a template (by --id, --template-id or --alias).
    #[arg(long)]
    pub delete_template: bool,

    /// List all sandboxes.
    #[arg(long)]
    pub list: bool,

    /// Show sandbox details.
    #[arg(long)]
    pub info: bool,

    /// Kill a sandbox.
    #[arg(long)]
    pub kill: bool,

    /// Pause a sandbox.
    #[arg(long)]
    pub pause: bool,

    /// Resume a paused sandbox.
    #[arg(long)]
    pub resume: bool,

    /// Connect to an existing sandbox.
    #[arg(long)]
    pub connect: bool,

    /// Enter an interactive shell.
    #[arg(long)]
    pub shell: bool,

    /// Sandbox ID.
    #[arg(long)]
    pub id: Option<String>,

    /// Sandbox ID (alternative).
    #[arg(long)]
    pub sandbox_id: Option<String>,

    /// Template ID.
    #[arg(long)]
    pub template_id: Option<String>,

    /// Template alias.
    #[arg(long)]
    pub alias: Option<String>,

    /// Sandbox timeout in minutes.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub minutes: Option<u32>,

    /// Python code to execute in the sandbox.
    #[arg(long)]
    pub code: Option<String>,

    /// Local Python file to execute in the sandbox.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Shell command to execute in the sandbox.
    #[arg(long)]
    pub command: Option<String>,

    /// Files to upload to the sandbox user's home directory.
    #[arg(long, num_args = 1..)]
    pub upload: Vec<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,
}

/// What a single invocation does, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListTemplates,
    DeleteTemplate,
    List,
    Info,
    Kill,
    Pause,
    Resume,
    Connect,
    Create,
}

/// Work done once a sandbox is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp<'a> {
    Shell,
    Code(&'a str),
    File(&'a std::path::Path),
    Command(&'a str),
    Nothing,
}

impl Args {
    pub fn action(&self) -> Action {
        if self.list_templates {
            Action::ListTemplates
        } else if self.delete_template {
            Action::DeleteTemplate
        } else if self.list {
            Action::List
        } else if self.info {
            Action::Info
        } else if self.kill {
            Action::Kill
        } else if self.pause {
            Action::Pause
        } else if self.resume {
            Action::Resume
        } else if self.connect {
            Action::Connect
        } else {
            Action::Create
        }
    }

    pub fn follow_up(&self) -> FollowUp<'_> {
        if self.shell {
            FollowUp::Shell
        } else if let Some(code) = &self.code {
            FollowUp::Code(code)
        } else if let Some(file) = &self.file {
            FollowUp::File(file)
        } else if let Some(command) = &self.command {
            FollowUp::Command(command)
        } else {
            FollowUp::Nothing
        }
    }

    /// `--id`, falling back to `--sandbox-id`.
    pub fn sandbox_ref(&self) -> Option<&str> {
        self.id.as_deref().or(self.sandbox_id.as_deref())
    }

    /// `--id`, `--template-id` or `--alias`, in that order.
    pub fn template_ref(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.template_id.as_deref())
            .or(self.alias.as_deref())
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["sbxctl"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn default_action_is_create() {
        assert_eq!(args(&["--alias", "sbx-world"]).action(), Action::Create);
    }

    #[test]
    fn earlier_actions_win() {
        assert_eq!(args(&["--list", "--kill"]).action(), Action::List);
        assert_eq!(
            args(&["--connect", "--list-templates"]).action(),
            Action::ListTemplates
        );
    }

    #[test]
    fn id_falls_back_to_sandbox_id() {
        assert_eq!(args(&["--sandbox-id", "sb1"]).sandbox_ref(), Some("sb1"));
        assert_eq!(
            args(&["--id", "a", "--sandbox-id", "b"]).sandbox_ref(),
            Some("a")
        );
    }

    #[test]
    fn template_ref_order() {
        assert_eq!(
            args(&["--template-id", "tpl-1234567", "--alias", "w"]).template_ref(),
            Some("tpl-1234567")
        );
        assert_eq!(args(&["--alias", "w"]).template_ref(), Some("w"));
    }

    #[test]
    fn shell_beats_other_follow_ups() {
        let a = args(&["--shell", "--code", "print(1)"]);
        assert_eq!(a.follow_up(), FollowUp::Shell);
        let b = args(&["--command", "ls", "--code", "print(1)"]);
        assert_eq!(b.follow_up(), FollowUp::Code("print(1)"));
    }

    #[test]
    fn upload_takes_many_files() {
        let a = args(&["--upload", "a.py", "b.csv", "--shell"]);
        assert_eq!(a.upload.len(), 2);
        assert!(a.shell);
    }

    #[test]
    fn zero_minutes_rejected() {
        assert!(Args::try_parse_from(["sbxctl", "--minutes", "0"]).is_err());
    }
}

//! Non-interactive execution: inline Python, a local Python file, or a shell command.

use std::path::Path;

use sbxctl_remote::envd::shell_quote;
use sbxctl_remote::{CommandResult, EnvdClient};

fn print_result(result: &CommandResult) -> i32 {
    println!("Exit code: {}", result.exit_code);
    if !result.stdout.is_empty() {
        println!("Stdout:\n{}", result.stdout.trim_end());
    }
    if !result.stderr.is_empty() {
        eprintln!("Stderr:\n{}", result.stderr.trim_end());
    }
    if let Some(error) = &result.error {
        tracing::debug!(%error, "process reported an error");
    }
    result.exit_code
}

async fn run(envd: &EnvdClient, cmd: &str, what: &str) -> i32 {
    match envd.run_command(cmd).await {
        Ok(result) => print_result(&result),
        Err(e) => {
            eprintln!("{what} execution failed: {e}");
            1
        }
    }
}

pub async fn execute_code(envd: &EnvdClient, code: &str) -> i32 {
    run(envd, &format!("python3 -c {}", shell_quote(code)), "Code").await
}

pub async fn execute_command(envd: &EnvdClient, command: &str) -> i32 {
    run(envd, command, "Command").await
}

/// Upload a local Python file to `/tmp` and run it there.
pub async fn execute_file(envd: &EnvdClient, path: &Path) -> i32 {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("File not found: {}", path.display());
            return 1;
        }
        Err(e) => {
            eprintln!("File execution failed: {e}");
            return 1;
        }
    };

    let Some(name) = path.file_name() else {
        eprintln!("File execution failed: {} has no file name", path.display());
        return 1;
    };
    let remote_path = format!("/tmp/{}", name.to_string_lossy());

    if let Err(e) = envd.write_file(&remote_path, data).await {
        eprintln!("File execution failed: {e}");
        return 1;
    }

    run(envd, &format!("python3 {}", shell_quote(&remote_path)), "File").await
}

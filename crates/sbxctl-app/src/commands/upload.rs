//! `--upload`: copy local files into the sandbox home directory.

use std::path::{Path, PathBuf};

use sbxctl_remote::EnvdClient;

/// Remote path for an upload: `<home>/<file name>`.
fn remote_path(home: &str, local: &Path) -> Option<String> {
    let name = local.file_name()?.to_string_lossy();
    Some(format!("{}/{}", home.trim_end_matches('/'), name))
}

/// Upload each file into `home`. Failures are reported per file and skipped.
pub async fn upload_files(envd: &EnvdClient, files: &[PathBuf], home: &str) {
    for local in files {
        let Some(remote) = remote_path(home, local) else {
            eprintln!("Warning: Upload failed for {}: no file name", local.display());
            continue;
        };

        let data = match tokio::fs::read(local).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("Warning: File not found: {}", local.display());
                continue;
            }
            Err(e) => {
                eprintln!("Warning: Upload failed for {}: {e}", local.display());
                continue;
            }
        };

        match envd.write_file(&remote, data).await {
            Ok(()) => println!("Uploaded: {} -> {remote}", local.display()),
            Err(e) => eprintln!("Warning: Upload failed for {}: {e}", local.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_file_name() {
        assert_eq!(
            remote_path("/home/user", Path::new("data/input.csv")).as_deref(),
            Some("/home/user/input.csv")
        );
        assert_eq!(
            remote_path("/root/", Path::new("a.py")).as_deref(),
            Some("/root/a.py")
        );
    }

    #[test]
    fn directory_root_has_no_name() {
        assert_eq!(remote_path("/home/user", Path::new("/")), None);
    }
}

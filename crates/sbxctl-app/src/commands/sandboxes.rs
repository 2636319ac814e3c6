use sbxctl_common::SbxError;
use sbxctl_remote::{ApiClient, SandboxDetail, SandboxListItem};

use crate::format::{format_date, render_table};

const HEADERS: [&str; 5] = ["ID", "STATE", "NAME", "START AT", "END AT"];

fn row(s: &SandboxListItem) -> Vec<String> {
    vec![
        s.sandbox_id.clone(),
        s.state.clone(),
        s.alias.clone().unwrap_or_default(),
        format_date(&s.started_at),
        format_date(&s.end_at),
    ]
}

fn info_lines(d: &SandboxDetail) -> Vec<String> {
    vec![
        format!("ID      : {}", d.sandbox_id),
        format!("STATE   : {}", d.state),
        format!("NAME    : {}", d.alias.as_deref().unwrap_or("")),
        format!("START AT: {}", format_date(&d.started_at)),
        format!("END AT  : {}", format_date(&d.end_at)),
        format!("CPU     : {}", d.cpu_count),
        format!("MEM MB  : {}", d.memory_mb),
    ]
}

pub async fn list(api: &ApiClient) -> Result<i32, SbxError> {
    let sandboxes = api.list_sandboxes().await?;
    let rows: Vec<Vec<String>> = sandboxes.iter().map(row).collect();
    println!("{}", render_table(&HEADERS, &rows));
    Ok(0)
}

pub async fn info(api: &ApiClient, id: &str) -> Result<i32, SbxError> {
    let detail = api.get_sandbox(id).await?;
    for line in info_lines(&detail) {
        println!("{line}");
    }
    Ok(0)
}

pub async fn kill(api: &ApiClient, id: &str) -> Result<i32, SbxError> {
    api.kill_sandbox(id).await?;
    println!("Killed: {id}");
    Ok(0)
}

pub async fn pause(api: &ApiClient, id: &str) -> Result<i32, SbxError> {
    let paused = api.pause_sandbox(id).await?;
    let status = if paused { "Paused:" } else { "Pause:" };
    println!("{status} {id}");
    Ok(0)
}

pub async fn resume(api: &ApiClient, id: &str) -> Result<i32, SbxError> {
    api.connect_sandbox(id, None).await?;
    let detail = api.get_sandbox(id).await?;
    println!("Resumed: {id} STATE:{}", detail.state);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn info_block_alignment() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let detail = SandboxDetail {
            sandbox_id: "iq3c9f0u2".into(),
            template_id: "tpl-8d1xkz2a".into(),
            alias: None,
            state: "paused".into(),
            started_at: at,
            end_at: at,
            cpu_count: 2,
            memory_mb: 512,
            envd_access_token: None,
        };
        let lines = info_lines(&detail);
        assert_eq!(lines[0], "ID      : iq3c9f0u2");
        assert_eq!(lines[2], "NAME    : ");
        assert_eq!(lines[3], "START AT: 2025-06-01 12:00:00Z");
        assert_eq!(lines[6], "MEM MB  : 512");
    }
}

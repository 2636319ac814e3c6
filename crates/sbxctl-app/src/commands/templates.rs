use sbxctl_common::SbxError;
use sbxctl_remote::{ApiClient, TemplateInfo};

use crate::format::{format_date, render_table};

const HEADERS: [&str; 7] = [
    "TEMPLATE ID",
    "ALIASES",
    "STATUS",
    "BUILDS",
    "CREATED AT",
    "UPDATED AT",
    "LAST USED AT",
];

fn row(t: &TemplateInfo) -> Vec<String> {
    vec![
        t.template_id.clone(),
        t.aliases.join(","),
        t.build_status.clone(),
        t.build_count.to_string(),
        format_date(&t.created_at),
        format_date(&t.updated_at),
        t.last_spawned_at.as_ref().map(format_date).unwrap_or_default(),
    ]
}

pub async fn list(api: &ApiClient) -> Result<i32, SbxError> {
    let templates = api.list_templates().await?;
    if templates.is_empty() {
        println!("No templates found");
        return Ok(0);
    }
    let rows: Vec<Vec<String>> = templates.iter().map(row).collect();
    println!("{}", render_table(&HEADERS, &rows));
    Ok(0)
}

pub async fn delete(api: &ApiClient, id_or_alias: &str) -> Result<i32, SbxError> {
    match api.delete_template(id_or_alias).await {
        Ok(id) => {
            println!("Template deleted: {id}");
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(error = %e, "template delete failed");
            eprintln!("Delete failed: {id_or_alias}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn row_joins_aliases_and_blanks_unused() {
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let t = TemplateInfo {
            template_id: "tpl-8d1xkz2a".into(),
            aliases: vec!["sbx-world".into(), "world".into()],
            build_status: "ready".into(),
            build_count: 2,
            created_at: created,
            updated_at: created,
            last_spawned_at: None,
        };
        let r = row(&t);
        assert_eq!(r[1], "sbx-world,world");
        assert_eq!(r[3], "2");
        assert_eq!(r[4], "2025-01-02 03:04:05Z");
        assert_eq!(r[6], "");
    }
}

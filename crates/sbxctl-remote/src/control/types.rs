//! Control plane request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of `GET /templates`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    #[serde(rename = "templateID")]
    pub template_id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub build_status: String,
    #[serde(default)]
    pub build_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_spawned_at: Option<DateTime<Utc>>,
}

/// One entry of `GET /v2/sandboxes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxListItem {
    #[serde(rename = "sandboxID")]
    pub sandbox_id: String,
    #[serde(rename = "templateID", default)]
    pub template_id: String,
    /// Template alias the sandbox was started from, shown as its name.
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub state: String,
    pub started_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

/// `GET /sandboxes/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxDetail {
    #[serde(rename = "sandboxID")]
    pub sandbox_id: String,
    #[serde(rename = "templateID", default)]
    pub template_id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub state: String,
    pub started_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub cpu_count: u32,
    #[serde(rename = "memoryMB", default)]
    pub memory_mb: u32,
    #[serde(default)]
    pub envd_access_token: Option<String>,
}

/// Response of `POST /sandboxes` and `POST /sandboxes/{id}/connect`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxCreated {
    #[serde(rename = "sandboxID")]
    pub sandbox_id: String,
    #[serde(rename = "templateID", default)]
    pub template_id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub envd_version: Option<String>,
    #[serde(default)]
    pub envd_access_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewSandbox<'a> {
    #[serde(rename = "templateID")]
    pub template_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TimeoutBody {
    pub timeout: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_template_list() {
        let json = r#"[{
            "templateID": "tpl-8d1xkz2a",
            "buildID": "b1",
            "aliases": ["sbx-world"],
            "buildStatus": "ready",
            "buildCount": 3,
            "public": false,
            "createdAt": "2025-01-02T03:04:05Z",
            "updatedAt": "2025-01-03T03:04:05.123Z",
            "lastSpawnedAt": null
        }]"#;
        let items: Vec<TemplateInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].template_id, "tpl-8d1xkz2a");
        assert_eq!(items[0].aliases, vec!["sbx-world"]);
        assert_eq!(items[0].build_count, 3);
        assert!(items[0].last_spawned_at.is_none());
    }

    #[test]
    fn parses_sandbox_detail() {
        let json = r#"{
            "templateID": "tpl-8d1xkz2a",
            "alias": "sbx-world",
            "sandboxID": "iq3c9f0u2",
            "clientID": "c",
            "startedAt": "2025-01-02T03:04:05Z",
            "endAt": "2025-01-02T04:04:05Z",
            "cpuCount": 2,
            "memoryMB": 512,
            "diskSizeMB": 1024,
            "metadata": {},
            "state": "running",
            "envdVersion": "0.2.0"
        }"#;
        let detail: SandboxDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.sandbox_id, "iq3c9f0u2");
        assert_eq!(detail.cpu_count, 2);
        assert_eq!(detail.memory_mb, 512);
        assert_eq!(detail.state, "running");
        assert!(detail.envd_access_token.is_none());
    }

    #[test]
    fn new_sandbox_omits_missing_timeout() {
        let body = NewSandbox {
            template_id: "sbx-world",
            timeout: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"templateID":"sbx-world"}"#
        );
    }
}

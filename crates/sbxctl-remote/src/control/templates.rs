//! Template listing and deletion.

use reqwest::Method;
use sbxctl_common::RemoteError;

use super::client::ApiClient;
use super::types::TemplateInfo;

/// Whether `name` already has the shape of a template id rather than an alias.
pub fn looks_like_template_id(name: &str) -> bool {
    name.starts_with("tpl-") && name.len() >= 10
}

/// Find the template whose aliases contain `alias`.
pub fn resolve_alias<'a>(templates: &'a [TemplateInfo], alias: &str) -> Option<&'a str> {
    templates
        .iter()
        .find(|t| t.aliases.iter().any(|a| a == alias))
        .map(|t| t.template_id.as_str())
}

impl ApiClient {
    pub async fn list_templates(&self) -> Result<Vec<TemplateInfo>, RemoteError> {
        let response = self.send(self.request(Method::GET, "/templates")).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        if body.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&body)
            .map_err(|e| RemoteError::Protocol(format!("invalid template list: {e}")))
    }

    /// Delete a template by id or alias. Returns the id that was deleted.
    ///
    /// Aliases are resolved through the template list; an alias that matches
    /// nothing is sent as-is and left for the service to reject.
    pub async fn delete_template(&self, id_or_alias: &str) -> Result<String, RemoteError> {
        let mut template_id = id_or_alias.to_string();

        if !looks_like_template_id(id_or_alias) {
            match self.list_templates().await {
                Ok(templates) => {
                    if let Some(id) = resolve_alias(&templates, id_or_alias) {
                        tracing::debug!(alias = id_or_alias, id, "resolved template alias");
                        template_id = id.to_string();
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "could not list templates to resolve alias");
                }
            }
        }

        let path = format!("/templates/{template_id}");
        self.send(self.request(Method::DELETE, &path)).await?;
        tracing::info!(template = %template_id, "template deleted");
        Ok(template_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn template(id: &str, aliases: &[&str]) -> TemplateInfo {
        TemplateInfo {
            template_id: id.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            build_status: "ready".into(),
            build_count: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_spawned_at: None,
        }
    }

    #[test]
    fn template_id_shape() {
        assert!(looks_like_template_id("tpl-8d1xkz2a"));
        assert!(!looks_like_template_id("tpl-1"));
        assert!(!looks_like_template_id("sbx-world"));
    }

    #[test]
    fn alias_resolution() {
        let templates = vec![
            template("tpl-aaaaaaaa", &["base"]),
            template("tpl-bbbbbbbb", &["sbx-world", "world"]),
        ];
        assert_eq!(resolve_alias(&templates, "world"), Some("tpl-bbbbbbbb"));
        assert_eq!(resolve_alias(&templates, "missing"), None);
    }
}

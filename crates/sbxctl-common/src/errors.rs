use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors surfaced by the Remote Execution Service clients.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Authentication failed: E2B_API_KEY is invalid or domain is incorrect")]
    Unauthorized,

    #[error("{status}: API error")]
    Api { status: u16, body: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("process error: {0}")]
    Process(String),

    #[error("pty {0} is closed")]
    Closed(u32),
}

impl RemoteError {
    /// Map a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 | 403 => RemoteError::Unauthorized,
            404 => RemoteError::NotFound(body.into()),
            _ => RemoteError::Api {
                status,
                body: body.into(),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SbxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("{0}")]
    Usage(String),}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");
    }

    #[test]
    fn remote_error_from_status() {
        assert!(matches!(
            RemoteError::from_status(401, ""),
            RemoteError::Unauthorized
        ));
        assert!(matches!(
            RemoteError::from_status(404, "sandbox abc"),
            RemoteError::NotFound(_)
        ));

        let err = RemoteError::from_status(500, "boom");
        assert_eq!(err.to_string(), "500: API error");
    }

    #[test]
    fn unauthorized_names_the_api_key() {
        let err = RemoteError::Unauthorized;
        assert!(err.to_string().contains("E2B_API_KEY"));
    }

    #[test]
    fn sbx_error_from_remote() {
        let remote = RemoteError::Network("connection refused".into());
        let err: SbxError = remote.into();
        assert!(matches!(err, SbxError::Remote(_)));
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn sbx_error_other_variants() {
        let err = SbxError::Terminal("raw mode unavailable".into());
        assert_eq!(err.to_string(), "terminal error: raw mode unavailable");

        let err = SbxError::Usage("Requires --id parameter".into());
        assert_eq!(err.to_string(), "Requires --id parameter");
    }
}

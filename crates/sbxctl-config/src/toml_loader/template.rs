//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# sbxctl configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Environment variables (E2B_API_KEY, E2B_DOMAIN, E2B_CUSTOM_IP,
# SANDBOX_MINUTES) take precedence over this file.

[api]
# api_key = "e2b_..."
# domain = "e2b.app"
# custom_ip = "10.0.0.5"       # resolve *.domain to this address
# insecure_tls = false         # defaults to true for private domains
# request_timeout_secs = 60

[sandbox]
# default_template = "base"
# minutes = 30                 # 1-1440
# shell_minutes = 60           # 1-1440, used by --shell when minutes is unset
# user = "user"

[bridge]
# poll_interval_ms = 100       # 10-1000
# join_timeout_ms = 1000       # 100-30000
# default_rows = 24
# default_cols = 80

[logging]
# level = "sbxctl=warn"
"##
    .to_string()
}

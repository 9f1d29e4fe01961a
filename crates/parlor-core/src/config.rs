//! Application configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Upper bound for `content.limit`.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Environment variable prefix used by [`Config::load_with_env`].
pub const ENV_PREFIX: &str = "PARLOR";

/// Main configuration structure for Parlor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Content store settings.
    pub content: ContentConfig,

    /// Identity provider glue.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Page-view analytics.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Live invalidation settings.
    #[serde(default)]
    pub live: LiveConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the compiled client site.
    #[serde(default = "default_site_root")]
    pub site_root: String,
}

/// Content store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Project identifier on the content platform.
    pub project_id: String,

    /// Dataset to query.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Dated API version, without the leading `v`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Query the CDN edge instead of the live API.
    #[serde(default)]
    pub use_cdn: bool,

    /// Explicit API host (e.g., "http://127.0.0.1:9000"), overriding the derived one.
    #[serde(default)]
    pub api_host: Option<String>,

    /// Token used for read queries.
    #[serde(default)]
    pub read_token: Option<String>,

    /// Write-capable token. Only referenced by operator diagnostics.
    #[serde(default)]
    pub write_token: Option<String>,

    /// Document type served by the content endpoint.
    #[serde(default = "default_document_type")]
    pub document_type: String,

    /// Maximum number of documents returned.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Invalidation tags attached to the content query.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

/// Identity provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Endpoint exchanging the provider session for a token.
    #[serde(default = "default_issue_token_path")]
    pub issue_token_path: String,

    /// Endpoint reporting the provider session as JSON.
    #[serde(default = "default_session_endpoint")]
    pub session_endpoint: String,

    /// Sign-in page route.
    #[serde(default = "default_sign_in_url")]
    pub sign_in_url: String,

    /// Sign-up page route.
    #[serde(default = "default_sign_up_url")]
    pub sign_up_url: String,

    /// Provider-hosted sign-in flow.
    #[serde(default = "default_hosted_sign_in_url")]
    pub hosted_sign_in_url: String,

    /// Provider-hosted sign-up flow.
    #[serde(default = "default_hosted_sign_up_url")]
    pub hosted_sign_up_url: String,
}

/// Analytics configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Whether page views are reported.
    #[serde(default)]
    pub enabled: bool,

    /// Beacon endpoint receiving page views.
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Live invalidation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Shared secret expected on invalidation webhooks.
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

/// Browser-facing subset of [`Config`], served at `/api/config`.
///
/// Holds nothing secret: tokens and the webhook secret stay on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identity provider glue.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Page-view analytics.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Tags the live subscriber watches.
    #[serde(default = "default_tags")]
    pub live_tags: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            analytics: AnalyticsConfig::default(),
            live_tags: default_tags(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_site_root() -> String {
    "target/site".to_string()
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_document_type() -> String {
    "chat".to_string()
}

fn default_limit() -> usize {
    100
}

fn default_tags() -> Vec<String> {
    vec!["chat".to_string()]
}

fn default_issue_token_path() -> String {
    "/api/auth/issue-token".to_string()
}

fn default_session_endpoint() -> String {
    "/api/auth/session".to_string()
}

fn default_sign_in_url() -> String {
    "/sign-in".to_string()
}

fn default_sign_up_url() -> String {
    "/sign-up".to_string()
}

fn default_hosted_sign_in_url() -> String {
    "/api/auth/sign-in".to_string()
}

fn default_hosted_sign_up_url() -> String {
    "/api/auth/sign-up".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            site_root: default_site_root(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issue_token_path: default_issue_token_path(),
            session_endpoint: default_session_endpoint(),
            sign_in_url: default_sign_in_url(),
            sign_up_url: default_sign_up_url(),
            hosted_sign_in_url: default_hosted_sign_in_url(),
            hosted_sign_up_url: default_hosted_sign_up_url(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration layered with `PARLOR__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(path, None)
    }

    /// Layer the file with environment overrides.
    ///
    /// `env` replaces the process environment when given.
    fn load_layered(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Settings the browser client needs.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            auth: self.auth.clone(),
            analytics: self.analytics.clone(),
            live_tags: self.content.tags.clone(),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.content.project_id.is_empty() {
            return Err(CoreError::config("content.project_id cannot be empty"));
        }

        if self.content.dataset.is_empty() {
            return Err(CoreError::config("content.dataset cannot be empty"));
        }

        if self.content.document_type.is_empty() {
            return Err(CoreError::config("content.document_type cannot be empty"));
        }

        if self.content.limit == 0 || self.content.limit > MAX_QUERY_LIMIT {
            return Err(CoreError::config(format!(
                "content.limit must be between 1 and {MAX_QUERY_LIMIT}"
            )));
        }

        if !self.auth.issue_token_path.starts_with('/') {
            return Err(CoreError::config(
                "auth.issue_token_path must be an absolute path",
            ));
        }

        if self.analytics.enabled && self.analytics.endpoint.is_none() {
            return Err(CoreError::config(
                "analytics.endpoint is required when analytics is enabled",
            ));
        }

        if self.content.api_version.starts_with('v') {
            tracing::warn!("content.api_version should not include the leading 'v'");
        }

        Ok(())
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Base URL of the content store query API.
    pub fn content_api_base(&self) -> String {
        match &self.content.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let edge = if self.content.use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{edge}.sanity.io", self.content.project_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
site_root = "dist"

[content]
project_id = "abc123"
dataset = "staging"
api_version = "2025-02-19"
use_cdn = true
read_token = "sk-read"
limit = 50
tags = ["chat", "admin"]

[auth]
issue_token_path = "/auth/token"

[analytics]
enabled = true
endpoint = "/beacon"

[live]
webhook_secret = "s3cret"
"#
        .to_string()
    }

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("parlor.toml");
        std::fs::write(&config_path, content).expect("write");
        (dir, config_path)
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("parlor.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.site_root, "dist");
        assert_eq!(config.content.project_id, "abc123");
        assert_eq!(config.content.dataset, "staging");
        assert!(config.content.use_cdn);
        assert_eq!(config.content.read_token.as_deref(), Some("sk-read"));
        assert!(config.content.write_token.is_none());
        assert_eq!(config.content.limit, 50);
        assert_eq!(config.content.tags, vec!["chat", "admin"]);
        assert_eq!(config.auth.issue_token_path, "/auth/token");
        assert_eq!(config.auth.sign_up_url, "/sign-up");
        assert!(config.analytics.enabled);
        assert_eq!(config.live.webhook_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_config_defaults() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"
"#,
        );

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.server.site_root, "target/site");
        assert_eq!(config.content.dataset, "production");
        assert_eq!(config.content.api_version, "2024-01-01");
        assert_eq!(config.content.document_type, "chat");
        assert_eq!(config.content.limit, 100);
        assert_eq!(config.content.tags, vec!["chat"]);
        assert_eq!(config.auth, AuthConfig::default());
        assert_eq!(config.auth.issue_token_path, "/api/auth/issue-token");
        assert!(!config.analytics.enabled);
        assert!(config.live.webhook_secret.is_none());
    }

    #[test]
    fn test_content_api_base() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"
"#,
        );
        let mut config = Config::load(&config_path).expect("load config");
        assert_eq!(config.content_api_base(), "https://abc123.api.sanity.io");

        config.content.use_cdn = true;
        assert_eq!(config.content_api_base(), "https://abc123.apicdn.sanity.io");

        config.content.api_host = Some("http://127.0.0.1:9000/".to_string());
        assert_eq!(config.content_api_base(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_config_validation_empty_project() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = ""
"#,
        );

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("project_id cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_limit_bounds() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"
limit = 0
"#,
        );

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("content.limit"));
    }

    #[test]
    fn test_config_validation_analytics_without_endpoint() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"

[analytics]
enabled = true
"#,
        );

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("analytics.endpoint"));
    }

    #[test]
    fn test_config_validation_relative_issue_token_path() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"

[auth]
issue_token_path = "api/auth/issue-token"
"#,
        );

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("issue_token_path"));
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"
dataset = "staging"
"#,
        );

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.content.project_id, "abc123");
        assert_eq!(config.content.dataset, "staging");
    }

    #[test]
    fn test_load_with_env_overrides_file() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"
limit = 25
"#,
        );
        let env: config::Map<String, String> = [
            ("PARLOR__CONTENT__WRITE_TOKEN", "sk-write"),
            ("PARLOR__CONTENT__LIMIT", "50"),
            ("PARLOR__AUTH__ISSUE_TOKEN_PATH", "/auth/token"),
            ("OTHER__CONTENT__DATASET", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::load_layered(&config_path, Some(env)).expect("load config");

        assert_eq!(config.content.write_token.as_deref(), Some("sk-write"));
        assert_eq!(config.content.limit, 50);
        assert_eq!(config.auth.issue_token_path, "/auth/token");
        assert_eq!(config.content.dataset, "production");
    }

    #[test]
    fn test_load_with_env_validates_overrides() {
        let (_dir, config_path) = write_config(
            r#"
[content]
project_id = "abc123"
"#,
        );
        let env: config::Map<String, String> = [("PARLOR__CONTENT__LIMIT", "0")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let err = Config::load_layered(&config_path, Some(env)).unwrap_err();
        assert!(err.to_string().contains("content.limit"));
    }

    #[test]
    fn test_client_config_carries_browser_settings() {
        let (_dir, config_path) = write_config(&create_test_config());
        let config = Config::load(&config_path).expect("load config");

        let client = config.client_config();
        assert_eq!(client.auth.issue_token_path, "/auth/token");
        assert!(client.analytics.enabled);
        assert_eq!(client.analytics.endpoint.as_deref(), Some("/beacon"));
        assert_eq!(client.live_tags, vec!["chat", "admin"]);

        let json = serde_json::to_string(&client).expect("serialize");
        assert!(!json.contains("sk-read"));
        assert!(!json.contains("s3cret"));
    }

    #[test]
    fn test_client_config_defaults_from_empty_json() {
        let client: ClientConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(client, ClientConfig::default());
        assert_eq!(client.live_tags, vec!["chat"]);
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/parlor.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}

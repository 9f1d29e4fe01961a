//! Content store query client.

use async_trait::async_trait;
use parlor_core::{Config, ContentDocument};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{ContentError, Result},
    query::QueryRequest,
};

/// Read access to the content store.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Run a read query and return the matching documents in store order.
    async fn fetch(&self, request: &QueryRequest) -> Result<Vec<ContentDocument>>;
}

/// Query API response envelope.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Value,
}

/// Client for the content store's HTTP query API.
#[derive(Debug, Clone)]
pub struct HttpContentClient {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    dataset: String,
    token: Option<String>,
}

impl HttpContentClient {
    /// Create a client for `dataset` at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        dataset: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("parlor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            dataset: dataset.into(),
            token: None,
        })
    }

    /// Create a client from the `[content]` configuration section.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(
            config.content_api_base(),
            &config.content.api_version,
            &config.content.dataset,
        )?;
        Ok(client.with_token(config.content.read_token.clone()))
    }

    /// Authenticate queries with a bearer token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Query endpoint URL.
    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.base_url, self.api_version, self.dataset
        )
    }
}

#[async_trait]
impl ContentClient for HttpContentClient {
    async fn fetch(&self, request: &QueryRequest) -> Result<Vec<ContentDocument>> {
        let url = self.query_url();
        tracing::debug!(%url, query = %request.query, tags = ?request.tags, "Querying content store");

        let mut pairs = request.to_query_pairs();
        pairs.push(("perspective".to_string(), "published".to_string()));

        let mut builder = self.client.get(&url).query(&pairs);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(ContentError::api(status.as_u16(), message));
        }

        let envelope: QueryResponse = serde_json::from_str(&body)?;
        match envelope.result {
            Value::Array(items) => {
                tracing::debug!(count = items.len(), "Content query succeeded");
                Ok(items.into_iter().map(ContentDocument::new).collect())
            }
            other => Err(ContentError::unexpected_shape(format!(
                "expected an array result, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Extract a human message from an error body.
///
/// The query API uses `{"error": {"description": ...}}`; proxies and older
/// API versions send `{"message": ...}` or `{"error": "..."}`.
fn api_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    let error = value.get("error");
    error
        .and_then(|e| e.get("description"))
        .or_else(|| value.get("message"))
        .or(error)
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| Some(trimmed.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use parlor_core::is_permission_error;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::*;

    const QUERY_PATH: &str = "/v2024-01-01/data/query/production";

    fn client_for(server: &MockServer) -> HttpContentClient {
        HttpContentClient::new(server.uri(), "2024-01-01", "production").expect("client")
    }

    #[test]
    fn test_query_url() {
        let client = HttpContentClient::new("https://abc.api.sanity.io/", "2024-01-01", "staging")
            .expect("client");
        assert_eq!(
            client.query_url(),
            "https://abc.api.sanity.io/v2024-01-01/data/query/staging"
        );
    }

    #[test]
    fn test_api_error_message_shapes() {
        assert_eq!(
            api_error_message(r#"{"error":{"description":"Insufficient permissions"}}"#).as_deref(),
            Some("Insufficient permissions")
        );
        assert_eq!(
            api_error_message(r#"{"message":"Dataset not found"}"#).as_deref(),
            Some("Dataset not found")
        );
        assert_eq!(
            api_error_message(r#"{"error":"Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(api_error_message("bad gateway").as_deref(), Some("bad gateway"));
        assert_eq!(api_error_message("   "), None);
    }

    #[tokio::test]
    async fn test_fetch_returns_documents_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("$type", "\"chat\""))
            .and(query_param("perspective", "published"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "*",
                "result": [
                    { "_id": "b", "_createdAt": "2024-05-02T00:00:00Z" },
                    { "_id": "a", "_createdAt": "2024-05-01T00:00:00Z" }
                ],
                "ms": 3
            })))
            .mount(&server)
            .await;

        let request = QueryRequest::recent_documents("chat", 100);
        let docs = client_for(&server).fetch(&request).await.expect("fetch");

        let ids: Vec<_> = docs.iter().filter_map(ContentDocument::id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(header("authorization", "Bearer sk-read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_token(Some("sk-read".to_string()));
        let docs = client
            .fetch(&QueryRequest::recent_documents("chat", 1))
            .await
            .expect("fetch");
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_maps_permission_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "description": "Insufficient permissions; permission \"read\" required",
                    "type": "mutationError"
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch(&QueryRequest::recent_documents("chat", 100))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Api { status: 403, .. }));
        assert!(is_permission_error(&err));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_array_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": null })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch(&QueryRequest::recent_documents("chat", 100))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::UnexpectedShape(_)));
        assert!(err.to_string().contains("null"));
    }

    #[tokio::test]
    async fn test_fetch_reports_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch(&QueryRequest::recent_documents("chat", 100))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Decode(_)));
    }
}

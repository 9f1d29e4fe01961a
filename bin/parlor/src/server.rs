//! HTTP server: content API, live invalidation stream and site hosting.

use std::{convert::Infallible, path::Path, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
};
use parlor_content::{ContentClient, Invalidation, LiveBus, QueryRequest};
use parlor_core::{ClientConfig, Config, ContentDocument, permission_error};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::error::ApiError;

/// Header carrying the invalidation webhook secret.
pub const WEBHOOK_SECRET_HEADER: &str = "x-parlor-webhook-secret";

/// SSE event name for invalidations.
pub const INVALIDATE_EVENT: &str = "invalidate";

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// Content store client.
    pub content: Arc<dyn ContentClient>,
    /// Query served by the content endpoint.
    pub query: Arc<QueryRequest>,
    /// Broadcast channel for live invalidations.
    pub live: LiveBus,
    /// Expected webhook secret, if any.
    pub webhook_secret: Option<Arc<str>>,
    /// Settings handed to the browser client.
    pub client_config: Arc<ClientConfig>,
}

impl AppState {
    /// Build state from configuration and a content client.
    pub fn new(config: &Config, content: Arc<dyn ContentClient>) -> Self {
        let query = QueryRequest::recent_documents(
            &config.content.document_type,
            config.content.limit,
        )
        .with_tags(config.content.tags.iter().cloned());

        Self {
            content,
            query: Arc::new(query),
            live: LiveBus::new(),
            webhook_secret: config.live.webhook_secret.as_deref().map(Arc::from),
            client_config: Arc::new(config.client_config()),
        }
    }
}

/// API routes without static hosting.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/config", get(config_handler))
        .route("/api/chats", get(chats_handler))
        .route("/api/live", get(live_handler))
        .route("/api/live/invalidate", post(invalidate_handler))
        .with_state(state)
}

/// API routes plus the compiled client site.
///
/// Unknown paths fall back to `index.html` so client-side routes resolve.
pub fn create_app(state: AppState, site_root: &Path) -> Router {
    let index = site_root.join("index.html");

    create_router(state)
        .fallback_service(ServeDir::new(site_root).fallback(ServeFile::new(index)))
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Browser-facing settings: auth endpoints, analytics and watched tags.
async fn config_handler(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.client_config.as_ref().clone())
}

/// Latest documents of the configured type, newest first.
async fn chats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentDocument>>, ApiError> {
    match state.content.fetch(&state.query).await {
        Ok(documents) => {
            tracing::debug!(count = documents.len(), tags = ?state.query.tags, "Served live data");
            Ok(Json(documents))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch live data");
            if let Some(remediation) = permission_error(&e) {
                tracing::warn!("{remediation}");
            }
            Err(ApiError::FetchFailed)
        }
    }
}

/// Server-Sent Events stream of invalidated tags.
async fn live_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.live.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(invalidation) => Some(Ok(Event::default()
            .event(INVALIDATE_EVENT)
            .data(invalidation.to_event_data()))),
        Err(_) => None, // Lagged receivers skip missed invalidations
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

/// Webhook payload from the content platform.
#[derive(Debug, Deserialize)]
pub struct InvalidateRequest {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    /// Browsers notified.
    pub receivers: usize,
}

/// Accepts invalidation webhooks and relays them to subscribers.
///
/// The secret is checked before the body is parsed.
async fn invalidate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<InvalidateResponse>), ApiError> {
    if let Some(expected) = &state.webhook_secret {
        let provided = headers
            .get(WEBHOOK_SECRET_HEADER)
            .map(|value| value.as_bytes())
            .unwrap_or_default();
        if !bool::from(provided.ct_eq(expected.as_bytes())) {
            tracing::warn!("Rejected invalidation webhook with bad secret");
            return Err(ApiError::Unauthorized);
        }
    }

    let request: InvalidateRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid invalidation payload: {e}")))?;

    let tags: Vec<String> = request
        .tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(ApiError::BadRequest("tags must not be empty".to_string()));
    }
    // Event data is comma-joined
    if let Some(tag) = tags.iter().find(|tag| tag.contains(',')) {
        return Err(ApiError::BadRequest(format!(
            "tag '{tag}' must not contain a comma"
        )));
    }

    let receivers = state.live.invalidate(Invalidation::new(tags));
    Ok((
        StatusCode::ACCEPTED,
        Json(InvalidateResponse { receivers }),
    ))
}

//! Chat document listing.

use gloo_net::http::Request;
use leptos::prelude::*;
use parlor_core::ContentDocument;
use serde::Deserialize;
use thiserror::Error;

/// Content endpoint served by the Parlor server.
pub const CHATS_ENDPOINT: &str = "/api/chats";

/// Failure loading chats in the browser.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The request never completed.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error payload.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The body was not a document array.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Load chat documents from the content endpoint.
pub async fn fetch_chats(endpoint: &str) -> Result<Vec<ContentDocument>, FetchError> {
    let response = Request::get(endpoint)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        return Err(FetchError::Server { status, message });
    }

    serde_json::from_str(&text).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Short label for a document in a list.
pub fn chat_label(doc: &ContentDocument) -> String {
    doc.title()
        .or(doc.id())
        .unwrap_or("Untitled chat")
        .to_string()
}

/// Human timestamp for a document, if it has one.
pub fn chat_timestamp(doc: &ContentDocument) -> Option<String> {
    doc.created_at()
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
}

/// List of chat documents, newest first as delivered.
#[component]
pub fn ChatList(
    /// Documents to render.
    #[prop(into)]
    chats: Signal<Vec<ContentDocument>>,
) -> impl IntoView {
    view! {
      <div class="parlor-chat-list">
        <Show
          when=move || !chats.with(Vec::is_empty)
          fallback=|| view! { <p class="parlor-chat-empty">"No chats yet."</p> }
        >
          <ul class="parlor-chat-items">
            <For
              each=move || chats.get().into_iter().enumerate()
              key=|(i, doc)| doc.id().map(str::to_string).unwrap_or_else(|| i.to_string())
              children=move |(_, doc)| {
                let label = chat_label(&doc);
                let timestamp = chat_timestamp(&doc);
                view! {
                  <li class="parlor-chat-item">
                    <span class="parlor-chat-title">{label}</span>
                    {timestamp
                      .map(|ts| view! { <time class="parlor-chat-time">{ts}</time> })}
                  </li>
                }
              }
            />
          </ul>
        </Show>
      </div>
    }
}

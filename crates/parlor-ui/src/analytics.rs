//! Page-view analytics.

use chrono::Utc;
use leptos::prelude::*;
use parlor_core::config::AnalyticsConfig;
use serde::{Deserialize, Serialize};

/// A page-view beacon payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    /// Route path.
    pub path: String,

    /// RFC 3339 timestamp.
    pub timestamp: String,
}

impl PageView {
    /// A page view of `path`, stamped now.
    pub fn now(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

fn send_beacon(endpoint: &str, view: &PageView) {
    let Ok(payload) = serde_json::to_string(view) else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window
        .navigator()
        .send_beacon_with_opt_str(endpoint, Some(&payload))
    {
        log::debug!("Analytics beacon failed: {e:?}");
    }
}

/// Initializes analytics and reports a page view on every route change.
#[component]
pub fn Analytics(
    /// Analytics settings.
    config: AnalyticsConfig,
    /// Current route path.
    current_path: Signal<String>,
) -> impl IntoView {
    let endpoint = match (config.enabled, config.endpoint) {
        (true, Some(endpoint)) => endpoint,
        _ => return,
    };
    log::info!("Analytics enabled, reporting to {endpoint}");

    Effect::new(move |_| {
        let path = current_path.get();
        send_beacon(&endpoint, &PageView::now(path));
    });
}

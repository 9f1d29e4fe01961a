//! App-wide providers wrapped around the page tree.

use gloo_net::http::Request;
use leptos::prelude::*;
use parlor_core::config::{AnalyticsConfig, AuthConfig, ClientConfig};

use crate::{
    analytics::Analytics,
    live::{LiveSubscriber, LiveVersion},
    session::SessionProvider,
    toast::{Toaster, Toasts},
};

/// Settings the providers need in the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub auth: AuthConfig,
    pub analytics: AnalyticsConfig,
    pub live_endpoint: String,
    pub live_tags: Vec<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ClientConfig::default().into()
    }
}

impl From<ClientConfig> for ProvidersConfig {
    fn from(config: ClientConfig) -> Self {
        Self {
            auth: config.auth,
            analytics: config.analytics,
            live_endpoint: "/api/live".to_string(),
            live_tags: config.live_tags,
        }
    }
}

/// Server endpoint serving [`ClientConfig`].
pub const CONFIG_ENDPOINT: &str = "/api/config";

/// Fetch the server's client settings, falling back to defaults.
pub async fn fetch_providers_config(endpoint: &str) -> ProvidersConfig {
    let config = match Request::get(endpoint).send().await {
        Ok(response) if response.ok() => {
            response.json::<ClientConfig>().await.unwrap_or_else(|e| {
                log::warn!("Malformed client config from {endpoint}: {e}");
                ClientConfig::default()
            })
        }
        Ok(response) => {
            log::warn!("Client config endpoint returned HTTP {}", response.status());
            ClientConfig::default()
        }
        Err(e) => {
            log::warn!("Client config unavailable: {e}");
            ClientConfig::default()
        }
    };
    config.into()
}

/// Provides session, toasts, analytics and live content to `children`.
#[component]
pub fn Providers(
    /// Provider settings.
    config: ProvidersConfig,
    /// Current route path, for analytics.
    #[prop(into)]
    current_path: Signal<String>,
    children: Children,
) -> impl IntoView {
    let version = LiveVersion::new();
    provide_context(version);
    provide_context(Toasts::new());
    provide_context(config.auth.clone());

    view! {
      <SessionProvider endpoint=config.auth.session_endpoint>
        <Analytics config=config.analytics current_path=current_path />
        <LiveSubscriber endpoint=config.live_endpoint tags=config.live_tags version=version />
        {children()}
        <Toaster />
      </SessionProvider>
    }
}

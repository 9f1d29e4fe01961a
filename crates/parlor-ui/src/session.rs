//! Read-only session context fed by the identity provider.

use std::time::Duration;

use gloo_net::http::Request;
use leptos::prelude::*;
use parlor_core::Session;

/// How often the provider session endpoint is polled.
const SESSION_POLL: Duration = Duration::from_secs(5);

/// Session state handed to components that need it.
///
/// Components receive a read-only signal; only [`SessionProvider`] writes it.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext(pub Signal<Session>);

impl SessionContext {
    /// Get the session from context.
    ///
    /// Falls back to a permanently signed-out session outside a provider.
    pub fn use_session() -> Signal<Session> {
        use_context::<Self>()
            .map(|ctx| ctx.0)
            .unwrap_or_else(|| Signal::derive(Session::signed_out))
    }
}

/// Fetch the provider session. Any failure reads as signed out.
pub async fn fetch_session(endpoint: &str) -> Session {
    match Request::get(endpoint).send().await {
        Ok(response) if response.ok() => response.json::<Session>().await.unwrap_or_else(|e| {
            log::warn!("Malformed session payload from {endpoint}: {e}");
            Session::signed_out()
        }),
        Ok(response) => {
            log::debug!("Session endpoint returned HTTP {}", response.status());
            Session::signed_out()
        }
        Err(e) => {
            log::warn!("Session endpoint unreachable: {e}");
            Session::signed_out()
        }
    }
}

/// Polls the provider session endpoint and provides [`SessionContext`].
#[component]
pub fn SessionProvider(
    /// Provider session endpoint.
    endpoint: String,
    children: Children,
) -> impl IntoView {
    let session = RwSignal::new(Session::signed_out());

    let refresh = move || {
        let endpoint = endpoint.clone();
        leptos::task::spawn_local(async move {
            let next = fetch_session(&endpoint).await;
            if session.get_untracked() != next {
                log::debug!("Session changed: signed_in={}", next.is_authenticated());
                session.set(next);
            }
        });
    };

    refresh();
    match set_interval_with_handle(refresh, SESSION_POLL) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::error!("Failed to start session polling: {e:?}"),
    }

    provide_context(SessionContext(session.read_only().into()));

    children()
}

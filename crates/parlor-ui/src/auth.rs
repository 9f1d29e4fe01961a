//! Authentication glue around the provider-hosted flows.

use leptos::prelude::*;
use parlor_core::{Navigator, RedirectBridge};

use crate::{session::SessionContext, toast::Toasts};

/// Full-page navigation through `window.location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to navigate to {url}");
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            log::error!("Navigation to {url} failed: {e:?}");
        }
    }
}

/// Sends the browser to the token endpoint once the session is signed in.
///
/// `redirect_url` is the value captured from the page's query string at load.
/// Without it this component does nothing.
#[component]
pub fn PostAuthRedirect(
    /// Token-issuing endpoint path.
    issue_token_path: String,
    /// Destination captured at page load.
    redirect_url: Option<String>,
) -> impl IntoView {
    let session = SessionContext::use_session();
    let toasts = Toasts::use_toasts();
    let bridge = StoredValue::new(RedirectBridge::new(issue_token_path, redirect_url));

    Effect::new(move |_| {
        let current = session.get();
        let mut navigated = false;
        bridge.update_value(|bridge| {
            navigated = bridge.on_session_change(&current, &BrowserNavigator);
        });
        if navigated {
            toasts.info("Signed in. Redirecting…");
        }
    });
}

/// Entry point into the provider-hosted sign-in or sign-up flow.
#[component]
pub fn AuthPanel(
    /// Heading text.
    title: String,
    /// Provider-hosted flow URL.
    flow_url: String,
    /// Call-to-action label.
    #[prop(default = "Continue".to_string())]
    action_label: String,
) -> impl IntoView {
    let session = SessionContext::use_session();
    let signed_in_as = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .filter(|_| s.is_signed_in)
                .map(|user| user.label().to_string())
        })
    };

    view! {
      <section class="parlor-auth-panel">
        <h1 class="parlor-auth-title">{title}</h1>
        <Show
          when=move || signed_in_as().is_some()
          fallback=move || {
            view! {
              <a href=flow_url.clone() class="parlor-auth-action">
                {action_label.clone()}
              </a>
            }
          }
        >
          <p class="parlor-auth-status">
            "Signed in as " {move || signed_in_as().unwrap_or_default()}
          </p>
        </Show>
      </section>
    }
}

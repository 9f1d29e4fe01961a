use leptos::prelude::*;
use parlor_core::config::AuthConfig;
use parlor_ui::SessionContext;

/// Renders the landing page.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_context::<AuthConfig>().unwrap_or_default();
    let session = SessionContext::use_session();
    let signed_in = move || session.with(|s| s.is_authenticated());

    view! {
      <section class="parlor-home">
        <h1>"Parlor"</h1>
        <p>"Live chats from the content store."</p>
        <Show
          when=signed_in
          fallback=move || {
            view! {
              <nav class="parlor-home-actions">
                <a href=auth.sign_in_url.clone()>"Sign in"</a>
                <a href=auth.sign_up_url.clone()>"Sign up"</a>
              </nav>
            }
          }
        >
          <a href="/admin" class="parlor-home-admin">"Open admin"</a>
        </Show>
      </section>
    }
}

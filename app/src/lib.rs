use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
    hooks::use_location,
};
use parlor_ui::{CONFIG_ENDPOINT, Providers, fetch_providers_config};

mod pages;

use pages::{AdminChats, AdminLayout, AdminOverview, HomePage, SignInPage, SignUpPage};

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
      <Title text="Parlor" />

      <Router>
        <Shell />
      </Router>
    }
}

/// Providers and routes; lives inside the router so it can read the location.
///
/// Nothing mounts until the server's client settings arrive, so the session
/// poller and redirect bridge start with the configured endpoints.
#[component]
fn Shell() -> impl IntoView {
    let location = use_location();
    let current_path = Signal::derive(move || location.pathname.get());
    let settings = LocalResource::new(|| fetch_providers_config(CONFIG_ENDPOINT));

    view! {
      {move || {
        settings
          .get()
          .map(|config| {
            view! {
              <Providers config=config current_path=current_path>
                <main>
                  <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage />
                    <Route path=StaticSegment("sign-in") view=SignInPage />
                    <Route path=StaticSegment("sign-up") view=SignUpPage />
                    <ParentRoute path=StaticSegment("admin") view=AdminLayout>
                      <Route path=StaticSegment("") view=AdminOverview />
                      <Route path=StaticSegment("chats") view=AdminChats />
                    </ParentRoute>
                  </Routes>
                </main>
              </Providers>
            }
          })
      }}
    }
}

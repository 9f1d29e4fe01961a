use leptos::prelude::*;
use leptos_router::{components::Outlet, hooks::use_location};
use parlor_core::ContentDocument;
use parlor_ui::{
    AdminNav, ChatList, FetchError, LiveVersion, SessionContext, Toasts, chats::CHATS_ENDPOINT,
    fetch_chats,
};

/// Chats resource that refetches whenever live content is invalidated.
fn use_live_chats() -> LocalResource<Result<Vec<ContentDocument>, FetchError>> {
    let version = LiveVersion::use_version();
    let toasts = Toasts::use_toasts();

    let chats = LocalResource::new(move || {
        // Subscribe to invalidations
        version.get();
        fetch_chats(CHATS_ENDPOINT)
    });

    // Only refetches after mount count as updates
    let mounted_at = version.get_untracked();
    Effect::new(move |_| match chats.get() {
        Some(Ok(_)) if version.get_untracked() > mounted_at => toasts.success("Chats updated"),
        Some(Err(e)) => {
            log::error!("Failed to load chats: {e}");
            toasts.error(e.to_string());
        }
        _ => {}
    });

    chats
}

/// Admin shell: navigation plus the nested admin route.
#[component]
pub fn AdminLayout() -> impl IntoView {
    let location = use_location();
    let current_path = Signal::derive(move || location.pathname.get());

    view! {
      <div class="parlor-admin">
        <aside class="parlor-admin-sidebar">
          <AdminNav current_path=current_path />
        </aside>
        <section class="parlor-admin-content">
          <Outlet />
        </section>
      </div>
    }
}

#[component]
pub fn AdminOverview() -> impl IntoView {
    let session = SessionContext::use_session();
    let chats = use_live_chats();

    let user_label = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .map(|user| user.label().to_string())
                .unwrap_or_else(|| "Not signed in".to_string())
        })
    };
    let chat_count = move || match chats.get() {
        Some(Ok(docs)) => docs.len().to_string(),
        Some(Err(_)) => "unavailable".to_string(),
        None => "…".to_string(),
    };

    view! {
      <h1>"Overview"</h1>
      <dl class="parlor-overview">
        <dt>"User"</dt>
        <dd>{user_label}</dd>
        <dt>"Chats"</dt>
        <dd>{chat_count}</dd>
      </dl>
    }
}

#[component]
pub fn AdminChats() -> impl IntoView {
    let chats = use_live_chats();

    view! {
      <h1>"Chats"</h1>
      {move || match chats.get() {
        None => view! { <p class="parlor-loading">"Loading chats…"</p> }.into_any(),
        Some(Ok(docs)) => view! { <ChatList chats=docs /> }.into_any(),
        Some(Err(e)) => view! { <p class="parlor-error">{e.to_string()}</p> }.into_any(),
      }}
    }
}

//! Admin navigation shell.
//!
//! A fixed pair of links with the one matching the current route highlighted.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// An admin navigation link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminLink {
    /// Display label.
    pub label: String,

    /// Link URL.
    pub url: String,

    /// Match only the URL itself, not its descendants.
    #[serde(default)]
    pub exact: bool,
}

impl AdminLink {
    /// Create a link that also matches nested routes.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            exact: false,
        }
    }

    /// Only match the exact URL.
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Whether `current` is this link's route.
    pub fn is_active(&self, current: &str) -> bool {
        let current = normalize(current);
        let url = normalize(&self.url);
        current == url || (!self.exact && current.starts_with(&format!("{url}/")))
    }
}

/// Strip a trailing slash, keeping the root as `/`.
fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// The admin links, in display order.
pub fn admin_links() -> [AdminLink; 2] {
    [
        AdminLink::new("Overview", "/admin").exact(),
        AdminLink::new("Chats", "/admin/chats"),
    ]
}

/// Admin navigation component.
#[component]
pub fn AdminNav(
    /// Current path for active highlighting.
    #[prop(into)]
    current_path: Signal<String>,
) -> impl IntoView {
    view! {
      <nav class="parlor-admin-nav" aria-label="Admin navigation">
        <ul class="parlor-admin-nav-list">
          {admin_links()
            .into_iter()
            .map(|link| view! { <AdminNavLink link=link current_path=current_path /> })
            .collect_view()}
        </ul>
      </nav>
    }
}

/// A single admin link.
#[component]
fn AdminNavLink(link: AdminLink, current_path: Signal<String>) -> impl IntoView {
    let matcher = link.clone();
    let is_active = Memo::new(move |_| matcher.is_active(&current_path.get()));

    view! {
      <li class="parlor-admin-nav-item" class:active=is_active>
        <a
          href=link.url
          class="parlor-admin-nav-link"
          aria-current=move || { if is_active.get() { Some("page") } else { None } }
        >
          {link.label}
        </a>
      </li>
    }
}

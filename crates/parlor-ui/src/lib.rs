//! Parlor UI Components
//!
//! Leptos components for the Parlor frontend.
//!
//! # Components
//!
//! ## Shell
//! - [`Providers`] - Session, toasts, analytics and live content around the page tree
//! - [`AdminNav`] - Admin navigation with active-route highlighting
//!
//! ## Auth
//! - [`PostAuthRedirect`] - Forwards to the token endpoint once signed in
//! - [`AuthPanel`] - Entry point into the provider-hosted flow
//!
//! ## Content
//! - [`ChatList`] - Renders chat documents
//!
//! # Example
//!
//! ```ignore
//! use leptos::prelude::*;
//! use parlor_ui::{AdminNav, Providers, ProvidersConfig};
//!
//! #[component]
//! fn Shell() -> impl IntoView {
//!     let path = Signal::derive(|| "/admin".to_string());
//!
//!     view! {
//!         <Providers config=ProvidersConfig::default() current_path=path>
//!             <AdminNav current_path=path />
//!         </Providers>
//!     }
//! }
//! ```

pub mod analytics;
pub mod auth;
pub mod chats;
pub mod live;
pub mod navigation;
pub mod providers;
pub mod session;
pub mod toast;

pub use analytics::{Analytics, PageView};
pub use auth::{AuthPanel, BrowserNavigator, PostAuthRedirect};
pub use chats::{ChatList, FetchError, fetch_chats};
pub use live::{LiveSubscriber, LiveVersion};
pub use navigation::{AdminLink, AdminNav, admin_links};
pub use providers::{CONFIG_ENDPOINT, Providers, ProvidersConfig, fetch_providers_config};
pub use session::{SessionContext, SessionProvider};
pub use toast::{Toast, ToastKind, ToastQueue, Toaster, Toasts};

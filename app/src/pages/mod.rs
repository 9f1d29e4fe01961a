//! Routed pages.

mod admin;
mod auth;
mod home;

pub use admin::{AdminChats, AdminLayout, AdminOverview};
pub use auth::{SignInPage, SignUpPage};
pub use home::HomePage;

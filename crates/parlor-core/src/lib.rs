//! Parlor Core Library
//!
//! Core types, configuration, and error handling shared by the Parlor server and
//! the browser frontend. Nothing in here touches the network or the DOM.

pub mod config;
pub mod content;
pub mod error;
pub mod permission;
pub mod redirect;
pub mod session;

pub use config::{ClientConfig, Config};
pub use content::ContentDocument;
pub use error::{CoreError, Result};
pub use permission::{ThrownValue, is_permission_error, permission_error};
pub use redirect::{Navigator, REDIRECT_PARAM, RedirectBridge, issue_token_url};
pub use session::{Session, User};

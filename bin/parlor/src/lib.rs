//! Parlor Server Library
//!
//! Core functionality behind the `parlor` binary, exposed as a library so the
//! router can be exercised in tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, check)
//! - [`server`] - Axum router: content API, live invalidation, site hosting
//! - [`error`] - HTTP error responses
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use parlor::cmd;
//!
//! // Validate a configuration file
//! cmd::check::run(Path::new("parlor.toml"), false).unwrap();
//! ```

pub mod cmd;
pub mod error;
pub mod server;

pub use error::ApiError;
pub use parlor_core::Config;
pub use server::{AppState, create_app, create_router};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// parlor::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

//! Serve command - run the Parlor HTTP server

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use parlor_content::HttpContentClient;
use parlor_core::Config;
use tokio::net::TcpListener;

use crate::server::{AppState, create_app};

/// Run the serve command.
///
/// `port` overrides `server.port` from the configuration.
pub async fn run(config_path: &Path, port: Option<u16>, open_browser: bool) -> Result<()> {
    tracing::info!(?config_path, ?port, "Starting server");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    if let Some(port) = port {
        config.server.port = port;
    }

    if config.content.write_token.is_none() {
        tracing::debug!("No write token configured; permission failures will name it");
    }

    let client =
        HttpContentClient::from_config(&config).wrap_err("Failed to create content client")?;
    tracing::info!(url = %client.query_url(), "Content store configured");

    let state = AppState::new(&config, Arc::new(client));
    let site_root = Path::new(&config.server.site_root);
    if !site_root.exists() {
        tracing::warn!(?site_root, "Site root does not exist; only the API will be served");
    }

    let app = create_app(state, site_root);
    let addr = config.bind_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Parlor running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    if open_browser {
        let _ = open::that(format!("http://{addr}"));
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}

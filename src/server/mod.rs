//! # HTTP Server for the Invoice Form
//!
//! Serves the embedded form frontend and the JSON API the form drives:
//! field edits, live preview PNG, logo upload, and PDF export.
//!
//! ## Usage
//!
//! ```bash
//! facture serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser to edit the invoice.

mod handlers;
mod state;
mod static_files;

pub use state::ServerConfig;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::FactureError;
use state::AppState;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use facture::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), facture::error::FactureError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), FactureError> {
    let app_state = Arc::new(AppState::new(config.clone()));

    let app = Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Invoice API
        .route("/api/invoice", get(handlers::invoice::get))
        .route("/api/invoice/edit", post(handlers::invoice::edit))
        .route("/api/invoice/reset", post(handlers::invoice::reset))
        // Logo upload (10MB limit)
        .route(
            "/api/logo",
            post(handlers::logo::upload).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        // Rendering
        .route("/api/preview.png", get(handlers::preview::png))
        .route("/api/export.pdf", get(handlers::export::pdf))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    tracing::info!(listen = %config.listen_addr, "facture server starting");
    tracing::info!("open http://{}/ in your browser to edit", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            FactureError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| FactureError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

//! Live preview handler.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::preview::render_preview;

use super::super::state::AppState;

/// Handle GET /api/preview.png - render the current invoice at scale 1.
pub async fn png(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let invoice = state.editor.read().await.invoice().clone();

    // Rasterization is CPU-bound; keep it off the async workers.
    let render_result =
        tokio::task::spawn_blocking(move || render_preview(&invoice, 1).to_png()).await;

    match render_result {
        Ok(Ok(png)) => {
            ([(header::CONTENT_TYPE, "image/png"), (header::CACHE_CONTROL, "no-store")], png)
                .into_response()
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "preview render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render preview: {}", e),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "preview task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e)).into_response()
        }
    }
}

//! PDF export handler.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::export::{ExportError, export_invoice};

use super::super::state::AppState;

/// Handle GET /api/export.pdf - run the capture→compose pipeline and
/// return the artifact as an attachment.
///
/// A second export triggered while one is in flight gets 409 instead of
/// queueing; the pipeline itself is a single attempt with no retries.
pub async fn pdf(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let Ok(_guard) = state.export_guard.try_lock() else {
        return (
            StatusCode::CONFLICT,
            "An export is already in progress".to_string(),
        )
            .into_response();
    };

    let invoice = state.editor.read().await.invoice().clone();

    let export_result = tokio::task::spawn_blocking(move || export_invoice(&invoice)).await;

    match export_result {
        Ok(Ok(artifact)) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", artifact.filename),
                ),
            ],
            artifact.bytes,
        )
            .into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "export failed");
            let status = match e {
                ExportError::Capture(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, format!("Export failed: {}", e)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "export task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e)).into_response()
        }
    }
}

//! Invoice state and edit handlers.

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::invoice::{FieldEdit, Invoice};

use super::super::state::AppState;

/// Handle GET /api/invoice - the current snapshot.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<Invoice> {
    let editor = state.editor.read().await;
    Json(editor.invoice().clone())
}

/// Handle POST /api/invoice/edit - apply one field edit and return the
/// updated snapshot. Unknown ops or fields are rejected by
/// deserialization before this handler runs.
pub async fn edit(
    State(state): State<Arc<AppState>>,
    Json(edit): Json<FieldEdit>,
) -> Json<Invoice> {
    let mut editor = state.editor.write().await;
    editor.apply(edit);
    Json(editor.invoice().clone())
}

/// Handle POST /api/invoice/reset - restore the default snapshot.
pub async fn reset(State(state): State<Arc<AppState>>) -> Json<Invoice> {
    let mut editor = state.editor.write().await;
    editor.apply(FieldEdit::Reset);
    Json(editor.invoice().clone())
}

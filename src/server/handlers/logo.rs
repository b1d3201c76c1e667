//! Logo upload handler.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::imageops::FilterType;
use std::sync::Arc;

use crate::invoice::{FieldEdit, Invoice};

use super::super::state::AppState;

/// Largest dimension kept after upload; bigger logos are downscaled
/// before being embedded in the invoice.
const MAX_LOGO_DIM: u32 = 512;

/// Handle POST /api/logo - accept an image file, re-encode it as a
/// self-contained PNG `data:` URL, and store it on the invoice.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Invoice>, (StatusCode, String)> {
    // Extract the logo field from multipart
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "logo" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read logo: {}", e)))?;
            image_data = Some(bytes.to_vec());
            break;
        }
    }

    let image_bytes =
        image_data.ok_or((StatusCode::BAD_REQUEST, "No logo field found".to_string()))?;

    let data_url = tokio::task::spawn_blocking(move || encode_logo(&image_bytes))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e)))?
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let mut editor = state.editor.write().await;
    editor.apply(FieldEdit::SetLogo { value: data_url });
    Ok(Json(editor.invoice().clone()))
}

/// Decode, bound, and re-encode an uploaded image as a PNG data URL.
fn encode_logo(bytes: &[u8]) -> Result<String, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;

    let img = if img.width() > MAX_LOGO_DIM || img.height() > MAX_LOGO_DIM {
        img.resize(MAX_LOGO_DIM, MAX_LOGO_DIM, FilterType::Triangle)
    } else {
        img
    };

    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| format!("Failed to encode logo: {}", e))?;

    Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)))
}

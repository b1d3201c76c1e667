//! # Export Pipeline
//!
//! Turns the current invoice into a downloadable single-page A4 PDF:
//!
//! ```text
//! Invoice → capture (render at 2x) → fit-to-page placement → compose PDF
//! ```
//!
//! Capture and composition are one synchronous sequence with a single
//! error boundary; callers on an async runtime wrap [`export_invoice`] in
//! `spawn_blocking`. One attempt per trigger, no retries, and a failure
//! never leaves a partial artifact — the bytes only exist on success.

pub mod geometry;
mod pdf;

pub use geometry::{PageGeometry, Placement};

use thiserror::Error;

use crate::invoice::Invoice;
use crate::layout;
use crate::preview::{Bitmap, PreviewRenderer, RenderError};

/// Supersampling scale used for export captures.
pub const EXPORT_SCALE: usize = 2;

/// Errors from the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The preview projection had nothing to capture.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// Rasterization of the projection failed.
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    /// Page composition or serialization failed.
    #[error("Page composition failed: {0}")]
    Compose(String),
}

/// A finished export: deterministic filename plus the PDF bytes.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The artifact name for an invoice: `invoice-<invoice number>.pdf`.
/// Path separators in the number are flattened so the name stays usable
/// as a plain filename.
pub fn artifact_filename(invoice: &Invoice) -> String {
    let number: String = invoice
        .meta
        .invoice_number
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("invoice-{}.pdf", number)
}

/// Capture the rendered preview as a bitmap at the given scale.
///
/// Aborts before any geometry work when the projection is empty — the
/// one way this rendition can lack a capturable preview surface.
pub fn capture(invoice: &Invoice, scale: usize) -> Result<Bitmap, ExportError> {
    let ops = layout::project(invoice);
    if ops.is_empty() {
        return Err(ExportError::Capture(
            "invoice preview is empty, nothing to capture".into(),
        ));
    }
    Ok(PreviewRenderer::new(scale).render(&ops))
}

/// Run the full pipeline: capture at 2x, fit onto A4, compose the PDF.
pub fn export_invoice(invoice: &Invoice) -> Result<ExportArtifact, ExportError> {
    let bitmap = capture(invoice, EXPORT_SCALE)?;

    let page = PageGeometry::a4_portrait();
    let placement = page.place(bitmap.width, bitmap.height);
    let bytes = pdf::compose(&bitmap, page, placement)?;

    tracing::info!(
        filename = %artifact_filename(invoice),
        bitmap_w = bitmap.width,
        bitmap_h = bitmap.height,
        bytes = bytes.len(),
        "invoice exported"
    );

    Ok(ExportArtifact {
        filename: artifact_filename(invoice),
        bytes,
    })
}

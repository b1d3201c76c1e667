//! # Error Types
//!
//! This module defines the top-level error type for facture operations.
//! The render and export pipelines carry their own focused error enums
//! ([`crate::preview::RenderError`], [`crate::export::ExportError`]) which
//! convert into [`FactureError`] at the crate boundary.

use thiserror::Error;

/// Main error type for facture operations
#[derive(Debug, Error)]
pub enum FactureError {
    /// Server-level errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// An invoice snapshot could not be parsed
    #[error("Invalid invoice: {0}")]
    InvalidInvoice(String),

    /// Preview rendering error
    #[error("Render error: {0}")]
    Render(#[from] crate::preview::RenderError),

    /// Export pipeline error
    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

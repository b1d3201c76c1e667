//! # Facture - Invoice Builder Library
//!
//! Facture is a Rust library for building invoices from structured form
//! state, rendering a live preview, and exporting a single-page A4 PDF.
//! It provides:
//!
//! - **Document model**: the invoice aggregate with a closed mutation surface
//! - **Derived totals**: the line-item sum recomputed on every item edit
//! - **Preview rendering**: layout projection rasterized with bitmap fonts
//! - **Export pipeline**: capture at 2x, fit-to-page scaling, PDF emission
//!
//! ## Quick Start
//!
//! ```
//! use facture::export::export_invoice;
//! use facture::invoice::{FieldEdit, InvoiceEditor, ItemField};
//!
//! // The editor owns the session's invoice
//! let mut editor = InvoiceEditor::new();
//!
//! // Mutate through the closed edit surface
//! editor.apply(FieldEdit::AddItem);
//! editor.apply(FieldEdit::SetItem {
//!     index: 1,
//!     field: ItemField::Amount,
//!     value: 1500.0.into(),
//! });
//! assert_eq!(editor.invoice().total, 6500.0);
//!
//! // Export the rendered preview as an A4 PDF artifact
//! let artifact = export_invoice(editor.invoice())?;
//! assert!(artifact.filename.ends_with(".pdf"));
//! # Ok::<(), facture::FactureError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`invoice`] | Document model and mutation surface |
//! | [`currency`] | Supported currencies and amount formatting |
//! | [`layout`] | Projection of an invoice into layout ops |
//! | [`preview`] | Op rasterization and PNG preview |
//! | [`export`] | Fit-to-page geometry and PDF artifact emission |
//! | [`server`] | Embedded form frontend and JSON API |
//! | [`error`] | Error types |

pub mod currency;
pub mod error;
pub mod export;
pub mod invoice;
pub mod layout;
pub mod preview;
pub mod server;

// Re-exports for convenience
pub use currency::Currency;
pub use error::FactureError;
pub use invoice::{FieldEdit, Invoice, InvoiceEditor};

//! # Invoice Document Model
//!
//! A single type hierarchy that is both the Rust API and the JSON API.
//! `Invoice` is constructible in Rust and deserializable from JSON; the
//! server, the CLI, and the tests all operate on the same types.
//!
//! ```ignore
//! use facture::invoice::*;
//!
//! // Rust construction
//! let mut invoice = Invoice::default_snapshot();
//! invoice.items.push(LineItem::new("Hosting", "Infrastructure", 120.0));
//! invoice.recompute_total();
//!
//! // JSON deserialization
//! let invoice: Invoice = serde_json::from_str(r#"{"title": "INVOICE"}"#).unwrap();
//! ```
//!
//! Every field carries a serde default so a partial snapshot deserializes
//! into a blank-but-valid invoice. The populated demo defaults live in
//! [`Invoice::default_snapshot`], which embeds the current year and date
//! at the moment it is called.

pub mod edit;

pub use edit::{
    BankField, FieldEdit, InvoiceEditor, ItemField, MetaField, RecipientField, SenderField,
};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// A line item amount: a number, or the raw text of a partially edited
/// numeric field. Mirrors the form's number input, which reports text
/// while the user is typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Coerce to a number. Parse failure (including the empty string)
    /// contributes zero; this is leniency, not an error, so the form
    /// stays usable mid-edit.
    pub fn to_number(&self) -> f64 {
        match self {
            Amount::Number(n) if n.is_finite() => *n,
            Amount::Number(_) => 0.0,
            Amount::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        }
    }

    /// The value as display/storage text for string-typed fields.
    pub fn into_text(self) -> String {
        match self {
            Amount::Number(n) => n.to_string(),
            Amount::Text(s) => s,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

/// The party issuing the invoice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// The party being billed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
}

/// Invoice identification metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceMeta {
    #[serde(default)]
    pub invoice_number: String,
    /// ISO calendar date (`%Y-%m-%d`), display-only.
    #[serde(default)]
    pub date: String,
    /// Optional; hidden from the preview when empty.
    #[serde(default)]
    pub service_period: String,
}

/// One billable row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    /// Service type label (second column of the items table).
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: Amount,
}

impl LineItem {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            amount: amount.into(),
        }
    }
}

/// Bank details block. Account number, SWIFT and address are optional
/// and hidden from the preview when empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BankDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub account_title: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub swift: String,
    #[serde(default)]
    pub address: String,
}

/// The root invoice aggregate.
///
/// `total` is derived from `items` and never independently settable;
/// call [`Invoice::recompute_total`] after mutating `items` directly.
/// [`InvoiceEditor`](edit::InvoiceEditor) does this automatically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub title: String,
    /// Encoded logo image as a `data:` URL; empty means absent.
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub from: Sender,
    #[serde(default)]
    pub to: Recipient,
    #[serde(default)]
    pub meta: InvoiceMeta,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub currency: Currency,
    /// Derived: `Σ coerce(items[i].amount)`.
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub bank: BankDetails,
    #[serde(default)]
    pub footer_note: String,
}

impl Invoice {
    /// The populated demo snapshot shown on first load.
    ///
    /// The invoice number embeds the current year and the date is today;
    /// both are captured at the moment this is called (reset restores the
    /// captured values, it does not regenerate them).
    pub fn default_snapshot() -> Self {
        let now = Local::now();
        Self {
            title: "INVOICE".into(),
            logo: String::new(),
            from: Sender {
                name: "Your Company".into(),
                address: "123 Street, City, Country".into(),
                email: "company@example.com".into(),
                phone: "+1 234 567 890".into(),
            },
            to: Recipient {
                company: "Client's Company".into(),
                address: "456 Avenue, City, Country".into(),
                email: "client@example.com".into(),
            },
            meta: InvoiceMeta {
                invoice_number: format!("INV-{}-001", now.format("%Y")),
                date: now.format("%Y-%m-%d").to_string(),
                service_period: String::new(),
            },
            items: vec![LineItem::new(
                "Website Design & Development",
                "Web Development",
                5000.00,
            )],
            currency: Currency::Pkr,
            total: 5000.00,
            bank: BankDetails {
                name: "Example Bank".into(),
                account_title: "Your Company LLC".into(),
                account_number: "1234567890".into(),
                iban: "EX1234567890".into(),
                swift: "EXAMPBK".into(),
                address: "Bank Address, City, Country".into(),
            },
            footer_note: "Thank you for your business!".into(),
        }
    }

    /// Sum of all item amounts, coercing non-numeric to zero.
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(|item| item.amount.to_number()).sum()
    }

    /// Re-derive `total` from the current items.
    pub fn recompute_total(&mut self) {
        self.total = self.computed_total();
    }
}

//! Mutation surface over the invoice model.
//!
//! All edits go through [`FieldEdit`], a closed tagged union of the valid
//! field targets. The same enum is the JSON wire format of the edit API
//! (`{"op": "set_meta", "field": "invoice_number", "value": "INV-7"}`), so
//! the compiler covers every mutable field and the form cannot address
//! anything else.
//!
//! [`InvoiceEditor`] owns the single invoice of the session. Every apply
//! replaces the snapshot wholesale (clone, update, swap) and re-derives
//! `total` whenever the items changed, so no observer can see a stale
//! total. No operation panics; out-of-range item indices are silent
//! no-ops, since a removal can race with an edit still in flight from
//! the form.

use serde::{Deserialize, Serialize};

use super::{Amount, Invoice, LineItem};
use crate::currency::Currency;

/// Editable fields of the sender block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderField {
    Name,
    Address,
    Email,
    Phone,
}

/// Editable fields of the recipient block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientField {
    Company,
    Address,
    Email,
}

/// Editable fields of the metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaField {
    InvoiceNumber,
    Date,
    ServicePeriod,
}

/// Editable fields of the bank block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankField {
    Name,
    AccountTitle,
    AccountNumber,
    Iban,
    Swift,
    Address,
}

/// Editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Name,
    Type,
    Amount,
}

/// One mutation of the invoice.
///
/// `total` has no variant here: it is derived, never directly settable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FieldEdit {
    SetTitle { value: String },
    SetLogo { value: String },
    SetCurrency { value: Currency },
    SetFooterNote { value: String },
    SetFrom { field: SenderField, value: String },
    SetTo { field: RecipientField, value: String },
    SetMeta { field: MetaField, value: String },
    SetBank { field: BankField, value: String },
    /// Edit one field of the item at `index`. String-typed fields
    /// stringify a numeric value; the amount field stores the value as-is.
    SetItem {
        index: usize,
        field: ItemField,
        value: Amount,
    },
    /// Append an empty line item (empty name and type, zero amount).
    AddItem,
    RemoveItem { index: usize },
    /// Restore the default snapshot captured at editor construction.
    Reset,
}

impl FieldEdit {
    /// Whether this edit touches the items sequence (and so requires a
    /// total recomputation).
    fn touches_items(&self) -> bool {
        matches!(
            self,
            FieldEdit::SetItem { .. } | FieldEdit::AddItem | FieldEdit::RemoveItem { .. }
        )
    }
}

/// Owner of the session's invoice and its default snapshot.
#[derive(Debug, Clone)]
pub struct InvoiceEditor {
    current: Invoice,
    default_snapshot: Invoice,
}

impl InvoiceEditor {
    /// Create an editor seeded with [`Invoice::default_snapshot`].
    ///
    /// The snapshot is computed once, here; `Reset` restores these exact
    /// values, including the invoice number and date captured now.
    pub fn new() -> Self {
        let snapshot = Invoice::default_snapshot();
        Self {
            current: snapshot.clone(),
            default_snapshot: snapshot,
        }
    }

    /// Create an editor over an existing invoice (e.g. loaded from JSON).
    /// The given invoice also becomes the reset target, and its total is
    /// re-derived so a stale stored value cannot survive the load.
    pub fn with_invoice(mut invoice: Invoice) -> Self {
        invoice.recompute_total();
        Self {
            current: invoice.clone(),
            default_snapshot: invoice,
        }
    }

    /// The current snapshot.
    pub fn invoice(&self) -> &Invoice {
        &self.current
    }

    /// Apply one edit, replacing the snapshot.
    pub fn apply(&mut self, edit: FieldEdit) {
        let mut next = self.current.clone();
        let recompute = edit.touches_items();

        match edit {
            FieldEdit::SetTitle { value } => next.title = value,
            FieldEdit::SetLogo { value } => next.logo = value,
            FieldEdit::SetCurrency { value } => next.currency = value,
            FieldEdit::SetFooterNote { value } => next.footer_note = value,
            FieldEdit::SetFrom { field, value } => match field {
                SenderField::Name => next.from.name = value,
                SenderField::Address => next.from.address = value,
                SenderField::Email => next.from.email = value,
                SenderField::Phone => next.from.phone = value,
            },
            FieldEdit::SetTo { field, value } => match field {
                RecipientField::Company => next.to.company = value,
                RecipientField::Address => next.to.address = value,
                RecipientField::Email => next.to.email = value,
            },
            FieldEdit::SetMeta { field, value } => match field {
                MetaField::InvoiceNumber => next.meta.invoice_number = value,
                MetaField::Date => next.meta.date = value,
                MetaField::ServicePeriod => next.meta.service_period = value,
            },
            FieldEdit::SetBank { field, value } => match field {
                BankField::Name => next.bank.name = value,
                BankField::AccountTitle => next.bank.account_title = value,
                BankField::AccountNumber => next.bank.account_number = value,
                BankField::Iban => next.bank.iban = value,
                BankField::Swift => next.bank.swift = value,
                BankField::Address => next.bank.address = value,
            },
            FieldEdit::SetItem {
                index,
                field,
                value,
            } => {
                if let Some(item) = next.items.get_mut(index) {
                    match field {
                        ItemField::Name => item.name = value.into_text(),
                        ItemField::Type => item.kind = value.into_text(),
                        ItemField::Amount => item.amount = value,
                    }
                }
            }
            FieldEdit::AddItem => next.items.push(LineItem::default()),
            FieldEdit::RemoveItem { index } => {
                if index < next.items.len() {
                    next.items.remove(index);
                }
            }
            FieldEdit::Reset => next = self.default_snapshot.clone(),
        }

        if recompute {
            next.recompute_total();
        }
        self.current = next;
    }
}

impl Default for InvoiceEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_title() {
        let mut editor = InvoiceEditor::new();
        editor.apply(FieldEdit::SetTitle {
            value: "RECEIPT".into(),
        });
        assert_eq!(editor.invoice().title, "RECEIPT");
    }

    #[test]
    fn test_nested_field_edits() {
        let mut editor = InvoiceEditor::new();
        editor.apply(FieldEdit::SetFrom {
            field: SenderField::Email,
            value: "billing@acme.test".into(),
        });
        editor.apply(FieldEdit::SetBank {
            field: BankField::Iban,
            value: "DE00 0000".into(),
        });
        editor.apply(FieldEdit::SetMeta {
            field: MetaField::ServicePeriod,
            value: "Q3 2026".into(),
        });
        let invoice = editor.invoice();
        assert_eq!(invoice.from.email, "billing@acme.test");
        assert_eq!(invoice.bank.iban, "DE00 0000");
        assert_eq!(invoice.meta.service_period, "Q3 2026");
    }

    #[test]
    fn test_add_item_recomputes_total() {
        let mut editor = InvoiceEditor::new();
        editor.apply(FieldEdit::AddItem);
        assert_eq!(editor.invoice().items.len(), 2);
        assert_eq!(editor.invoice().items[1], LineItem::default());
        // New item contributes zero
        assert_eq!(editor.invoice().total, 5000.0);

        editor.apply(FieldEdit::SetItem {
            index: 1,
            field: ItemField::Amount,
            value: Amount::Text("1500".into()),
        });
        assert_eq!(editor.invoice().total, 6500.0);
    }

    #[test]
    fn test_remove_item_recomputes_total() {
        let mut editor = InvoiceEditor::new();
        editor.apply(FieldEdit::AddItem);
        editor.apply(FieldEdit::SetItem {
            index: 1,
            field: ItemField::Amount,
            value: Amount::Number(1500.0),
        });
        editor.apply(FieldEdit::RemoveItem { index: 0 });
        assert_eq!(editor.invoice().items.len(), 1);
        assert_eq!(editor.invoice().total, 1500.0);
    }

    #[test]
    fn test_remove_only_item_total_zero() {
        let mut editor = InvoiceEditor::new();
        editor.apply(FieldEdit::RemoveItem { index: 0 });
        assert!(editor.invoice().items.is_empty());
        assert_eq!(editor.invoice().total, 0.0);
    }

    #[test]
    fn test_out_of_range_item_edits_are_noops() {
        let mut editor = InvoiceEditor::new();
        let before = editor.invoice().clone();
        editor.apply(FieldEdit::SetItem {
            index: 7,
            field: ItemField::Amount,
            value: Amount::Number(9.0),
        });
        editor.apply(FieldEdit::RemoveItem { index: 7 });
        assert_eq!(editor.invoice(), &before);
    }

    #[test]
    fn test_non_numeric_amount_counts_as_zero() {
        let mut editor = InvoiceEditor::new();
        editor.apply(FieldEdit::SetItem {
            index: 0,
            field: ItemField::Amount,
            value: Amount::Text("abc".into()),
        });
        assert_eq!(editor.invoice().total, 0.0);
    }

    #[test]
    fn test_non_item_edits_do_not_touch_total() {
        let mut editor = InvoiceEditor::new();
        // Plant a stale total to prove nothing outside items recomputes it.
        editor.current.total = 42.0;
        editor.apply(FieldEdit::SetTitle {
            value: "X".into(),
        });
        assert_eq!(editor.invoice().total, 42.0);
        editor.apply(FieldEdit::AddItem);
        assert_eq!(editor.invoice().total, 5000.0);
    }

    #[test]
    fn test_reset_restores_captured_snapshot() {
        let mut editor = InvoiceEditor::new();
        let original = editor.invoice().clone();

        editor.apply(FieldEdit::SetTitle {
            value: "CHANGED".into(),
        });
        editor.apply(FieldEdit::SetLogo {
            value: "data:image/png;base64,AAAA".into(),
        });
        editor.apply(FieldEdit::RemoveItem { index: 0 });
        editor.apply(FieldEdit::AddItem);
        editor.apply(FieldEdit::Reset);

        assert_eq!(editor.invoice(), &original);
        assert!(editor.invoice().logo.is_empty());
        assert_eq!(editor.invoice().items.len(), 1);
    }

    #[test]
    fn test_total_invariant_over_random_sequence() {
        let mut editor = InvoiceEditor::new();
        let edits = vec![
            FieldEdit::AddItem,
            FieldEdit::SetItem {
                index: 1,
                field: ItemField::Amount,
                value: Amount::Text("250.25".into()),
            },
            FieldEdit::AddItem,
            FieldEdit::SetItem {
                index: 2,
                field: ItemField::Amount,
                value: Amount::Number(100.0),
            },
            FieldEdit::RemoveItem { index: 0 },
            FieldEdit::SetItem {
                index: 0,
                field: ItemField::Amount,
                value: Amount::Text("".into()),
            },
        ];
        for edit in edits {
            editor.apply(edit);
            let expected = editor.invoice().computed_total();
            assert_eq!(editor.invoice().total, expected);
        }
        assert_eq!(editor.invoice().total, 100.0);
    }

    #[test]
    fn test_field_edit_wire_format() {
        let edit: FieldEdit = serde_json::from_str(
            r#"{"op": "set_meta", "field": "invoice_number", "value": "INV-9"}"#,
        )
        .unwrap();
        assert_eq!(
            edit,
            FieldEdit::SetMeta {
                field: MetaField::InvoiceNumber,
                value: "INV-9".into()
            }
        );

        let edit: FieldEdit =
            serde_json::from_str(r#"{"op": "set_item", "index": 0, "field": "amount", "value": "12"}"#)
                .unwrap();
        assert_eq!(
            edit,
            FieldEdit::SetItem {
                index: 0,
                field: ItemField::Amount,
                value: Amount::Text("12".into())
            }
        );

        let edit: FieldEdit = serde_json::from_str(r#"{"op": "reset"}"#).unwrap();
        assert_eq!(edit, FieldEdit::Reset);
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(serde_json::from_str::<FieldEdit>(r#"{"op": "set_total", "value": 1}"#).is_err());
    }

    #[test]
    fn test_with_invoice_recomputes_stale_total() {
        let mut invoice = Invoice::default_snapshot();
        invoice.total = 999999.0;
        let editor = InvoiceEditor::with_invoice(invoice);
        assert_eq!(editor.invoice().total, 5000.0);
    }
}

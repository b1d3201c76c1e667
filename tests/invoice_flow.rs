//! # End-to-End Invoice Flow Tests
//!
//! Exercises the public API the way the form does: start from the default
//! snapshot, apply edits, and export — asserting the derived total
//! invariant, render idempotence, and the artifact contract along the way.

use chrono::Local;
use pretty_assertions::assert_eq;

use facture::currency::Currency;
use facture::export::{EXPORT_SCALE, PageGeometry, capture, export_invoice};
use facture::invoice::{Amount, FieldEdit, Invoice, InvoiceEditor, ItemField, MetaField};
use facture::preview::render_preview;

#[test]
fn default_to_export_scenario() {
    let mut editor = InvoiceEditor::new();

    // Defaults: one item, amount 5000.00, currency PKR
    assert_eq!(editor.invoice().items.len(), 1);
    assert_eq!(editor.invoice().currency, Currency::Pkr);
    assert_eq!(editor.invoice().total, 5000.0);

    // Add an item of 1500
    editor.apply(FieldEdit::AddItem);
    editor.apply(FieldEdit::SetItem {
        index: 1,
        field: ItemField::Amount,
        value: Amount::Text("1500".into()),
    });
    assert_eq!(editor.invoice().total, 6500.0);

    // Remove the first item
    editor.apply(FieldEdit::RemoveItem { index: 0 });
    assert_eq!(editor.invoice().total, 1500.0);

    // Export produces the deterministic artifact name
    let artifact = export_invoice(editor.invoice()).unwrap();
    let year = Local::now().format("%Y").to_string();
    assert_eq!(artifact.filename, format!("invoice-INV-{}-001.pdf", year));
    assert!(artifact.bytes.starts_with(b"%PDF-"));
}

#[test]
fn total_tracks_every_item_mutation() {
    let mut editor = InvoiceEditor::new();
    let edits = [
        FieldEdit::AddItem,
        FieldEdit::AddItem,
        FieldEdit::SetItem {
            index: 1,
            field: ItemField::Amount,
            value: Amount::Number(99.5),
        },
        FieldEdit::SetItem {
            index: 2,
            field: ItemField::Amount,
            value: Amount::Text("garbage".into()),
        },
        FieldEdit::RemoveItem { index: 0 },
        FieldEdit::AddItem,
        FieldEdit::SetItem {
            index: 2,
            field: ItemField::Amount,
            value: Amount::Text("0.5".into()),
        },
    ];
    for edit in edits {
        editor.apply(edit);
        assert_eq!(editor.invoice().total, editor.invoice().computed_total());
    }
    assert_eq!(editor.invoice().total, 100.0);
}

#[test]
fn removing_the_only_item_zeroes_total() {
    let mut editor = InvoiceEditor::new();
    editor.apply(FieldEdit::RemoveItem { index: 0 });
    assert_eq!(editor.invoice().total, 0.0);
}

#[test]
fn reset_restores_the_captured_snapshot() {
    let mut editor = InvoiceEditor::new();
    let original = editor.invoice().clone();

    editor.apply(FieldEdit::SetTitle {
        value: "SOMETHING ELSE".into(),
    });
    editor.apply(FieldEdit::SetLogo {
        value: "data:image/png;base64,AAAA".into(),
    });
    editor.apply(FieldEdit::AddItem);
    editor.apply(FieldEdit::SetCurrency {
        value: Currency::Myr,
    });
    editor.apply(FieldEdit::Reset);

    assert_eq!(editor.invoice(), &original);
    assert!(editor.invoice().logo.is_empty());
    assert_eq!(editor.invoice().items.len(), 1);
    assert_eq!(editor.invoice().total, 5000.0);
}

#[test]
fn rendering_is_idempotent_without_mutation() {
    let invoice = Invoice::default_snapshot();
    let first = render_preview(&invoice, 1);
    let second = render_preview(&invoice, 1);
    assert_eq!(first, second);

    let a = capture(&invoice, EXPORT_SCALE).unwrap();
    let b = capture(&invoice, EXPORT_SCALE).unwrap();
    assert_eq!((a.width, a.height), (b.width, b.height));
    assert_eq!(a.pixels, b.pixels);
}

#[test]
fn export_geometry_bounds_hold_for_real_captures() {
    let page = PageGeometry::a4_portrait();

    // Short invoice (wide relative to height) and a long one (many items)
    let mut short = Invoice::default_snapshot();
    short.bank = Default::default();
    short.footer_note.clear();

    let mut long = Invoice::default_snapshot();
    for i in 0..40 {
        long.items.push(facture::invoice::LineItem::new(
            format!("Line item number {i} with a reasonably long name"),
            "Consulting",
            125.0,
        ));
    }
    long.recompute_total();

    for invoice in [short, long] {
        let bitmap = capture(&invoice, EXPORT_SCALE).unwrap();
        let p = page.place(bitmap.width, bitmap.height);

        assert!(p.width <= page.usable_width() + 1e-6);
        assert!(p.height <= page.usable_height() + 1e-6);
        let width_tight = (p.width - page.usable_width()).abs() < 1e-6;
        let height_tight = (p.height - page.usable_height()).abs() < 1e-6;
        assert!(width_tight || height_tight);

        let aspect = bitmap.width as f64 / bitmap.height as f64;
        assert!((p.width / p.height - aspect).abs() < 1e-6);
    }
}

#[test]
fn export_rejects_blank_invoice_and_leaves_model_editable() {
    let mut editor = InvoiceEditor::with_invoice(Invoice::default());
    assert!(export_invoice(editor.invoice()).is_err());

    // The model stays valid and editable after the failure
    editor.apply(FieldEdit::SetTitle {
        value: "INVOICE".into(),
    });
    assert_eq!(editor.invoice().title, "INVOICE");
    assert!(export_invoice(editor.invoice()).is_ok());
}

#[test]
fn invoice_json_round_trips_through_the_wire_format() {
    let mut editor = InvoiceEditor::new();
    editor.apply(FieldEdit::SetMeta {
        field: MetaField::ServicePeriod,
        value: "July 2026".into(),
    });

    let json = serde_json::to_string(editor.invoice()).unwrap();
    let parsed: Invoice = serde_json::from_str(&json).unwrap();
    assert_eq!(&parsed, editor.invoice());
}

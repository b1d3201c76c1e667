//! Projection of an [`Invoice`] into flat layout ops.
//!
//! The op list is the seam between the document model and the raster
//! renderer: [`project`] decides what appears on the page and in which
//! order, [`crate::preview::PreviewRenderer`] decides pixels. Tests can
//! assert on the ops without rendering anything.

use crate::invoice::Invoice;

/// Page width in pixels at scale 1 (A4 width at 96 dpi).
pub const PAGE_WIDTH: u32 = 794;

/// Horizontal and top page padding in pixels at scale 1.
pub const PAGE_MARGIN: u32 = 56;

/// Maximum rendered logo height in pixels at scale 1.
pub const LOGO_MAX_HEIGHT: u32 = 96;

/// Type sizes available to the projection, mapped to bitmap fonts by the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSize {
    Small,
    #[default]
    Body,
    Heading,
    Title,
}

/// Horizontal alignment within the content area or a row cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Text styling shared by `Text` and `Row` ops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextStyle {
    pub size: FontSize,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn bold(size: FontSize) -> Self {
        Self {
            size,
            bold: true,
            ..Default::default()
        }
    }
}

/// One cell of a multi-column row. `frac` is the cell's share of the
/// content width; a row's fractions should sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub content: String,
    pub frac: f32,
    pub align: Align,
}

impl Cell {
    pub fn new(content: impl Into<String>, frac: f32) -> Self {
        Self {
            content: content.into(),
            frac,
            align: Align::Left,
        }
    }

    pub fn right(content: impl Into<String>, frac: f32) -> Self {
        Self {
            content: content.into(),
            frac,
            align: Align::Right,
        }
    }
}

/// A layout operation consumed by the preview renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// A full-width line of text (wrapped if it overflows).
    Text { content: String, style: TextStyle },
    /// Side-by-side cells on one baseline.
    Row { cells: Vec<Cell>, style: TextStyle },
    /// Horizontal rule across the content width, `weight` pixels thick.
    Rule { weight: u32 },
    /// Vertical whitespace.
    Gap { px: u32 },
    /// The logo image, blitted at the left edge from its `data:` URL.
    Logo { source: String },
}

/// Fractions of the items table: name, type, amount.
const ITEM_COLUMNS: [f32; 3] = [0.5, 0.28, 0.22];

/// Project an invoice into its visual op sequence.
///
/// Sections with no content are skipped entirely; a blank invoice
/// projects to an empty list, which the export pipeline reports as a
/// capture error.
pub fn project(invoice: &Invoice) -> Vec<Op> {
    let mut ops = Vec::new();

    // Header: logo left, title large underneath a shared rule.
    if !invoice.logo.is_empty() {
        ops.push(Op::Logo {
            source: invoice.logo.clone(),
        });
        ops.push(Op::Gap { px: 12 });
    }
    if !invoice.title.is_empty() {
        ops.push(Op::Text {
            content: invoice.title.clone(),
            style: TextStyle {
                size: FontSize::Title,
                bold: true,
                align: Align::Right,
            },
        });
    }
    if !ops.is_empty() {
        ops.push(Op::Gap { px: 16 });
        ops.push(Op::Rule { weight: 2 });
        ops.push(Op::Gap { px: 20 });
    }

    project_parties(invoice, &mut ops);
    project_meta(invoice, &mut ops);
    project_items(invoice, &mut ops);
    project_bank(invoice, &mut ops);

    if !invoice.footer_note.is_empty() {
        ops.push(Op::Gap { px: 28 });
        ops.push(Op::Rule { weight: 1 });
        ops.push(Op::Gap { px: 14 });
        ops.push(Op::Text {
            content: invoice.footer_note.clone(),
            style: TextStyle {
                size: FontSize::Body,
                bold: false,
                align: Align::Center,
            },
        });
    }

    ops
}

/// FROM / TO as paired two-column rows.
fn project_parties(invoice: &Invoice, ops: &mut Vec<Op>) {
    let from_lines: Vec<String> = [
        invoice.from.name.clone(),
        invoice.from.address.clone(),
        invoice.from.email.clone(),
        invoice.from.phone.clone(),
    ]
    .into_iter()
    .filter(|l| !l.is_empty())
    .collect();

    let to_lines: Vec<String> = [
        invoice.to.company.clone(),
        invoice.to.address.clone(),
        invoice.to.email.clone(),
    ]
    .into_iter()
    .filter(|l| !l.is_empty())
    .collect();

    if from_lines.is_empty() && to_lines.is_empty() {
        return;
    }

    ops.push(Op::Row {
        cells: vec![Cell::new("FROM", 0.5), Cell::new("TO", 0.5)],
        style: TextStyle::bold(FontSize::Heading),
    });
    ops.push(Op::Gap { px: 6 });

    for i in 0..from_lines.len().max(to_lines.len()) {
        let left = from_lines.get(i).cloned().unwrap_or_default();
        let right = to_lines.get(i).cloned().unwrap_or_default();
        // First line of each party is its name, set bold.
        let style = if i == 0 {
            TextStyle::bold(FontSize::Body)
        } else {
            TextStyle::default()
        };
        ops.push(Op::Row {
            cells: vec![Cell::new(left, 0.5), Cell::new(right, 0.5)],
            style,
        });
    }
    ops.push(Op::Gap { px: 24 });
}

/// Invoice number, date, and (when set) service period on one row.
fn project_meta(invoice: &Invoice, ops: &mut Vec<Op>) {
    let mut fields = Vec::new();
    if !invoice.meta.invoice_number.is_empty() {
        fields.push(format!("Invoice #: {}", invoice.meta.invoice_number));
    }
    if !invoice.meta.date.is_empty() {
        fields.push(format!("Date: {}", invoice.meta.date));
    }
    if !invoice.meta.service_period.is_empty() {
        fields.push(format!("Service Period: {}", invoice.meta.service_period));
    }
    if fields.is_empty() {
        return;
    }

    let frac = 1.0 / fields.len() as f32;
    ops.push(Op::Row {
        cells: fields.into_iter().map(|f| Cell::new(f, frac)).collect(),
        style: TextStyle::default(),
    });
    ops.push(Op::Gap { px: 24 });
}

/// Items table with header, per-row rules, and the total line.
fn project_items(invoice: &Invoice, ops: &mut Vec<Op>) {
    if invoice.items.is_empty() {
        return;
    }
    let [name_w, kind_w, amount_w] = ITEM_COLUMNS;

    ops.push(Op::Row {
        cells: vec![
            Cell::new("Project / Service", name_w),
            Cell::new("Type", kind_w),
            Cell::right("Amount", amount_w),
        ],
        style: TextStyle::bold(FontSize::Body),
    });
    ops.push(Op::Rule { weight: 2 });

    for item in &invoice.items {
        ops.push(Op::Gap { px: 6 });
        ops.push(Op::Row {
            cells: vec![
                Cell::new(item.name.clone(), name_w),
                Cell::new(item.kind.clone(), kind_w),
                Cell::right(invoice.currency.format(item.amount.to_number()), amount_w),
            ],
            style: TextStyle::default(),
        });
        ops.push(Op::Gap { px: 6 });
        ops.push(Op::Rule { weight: 1 });
    }

    ops.push(Op::Gap { px: 14 });
    ops.push(Op::Row {
        cells: vec![
            Cell::new("", name_w),
            Cell::right(total_label(invoice), kind_w),
            Cell::right(invoice.currency.format(invoice.total), amount_w),
        ],
        style: TextStyle::bold(FontSize::Body),
    });
    ops.push(Op::Gap { px: 24 });
}

fn total_label(invoice: &Invoice) -> String {
    match invoice.currency {
        crate::currency::Currency::Pkr => {
            format!("Total Amount ({}):", invoice.currency.code())
        }
        _ => "Total:".to_string(),
    }
}

/// Bank details block; optional lines only when non-empty.
fn project_bank(invoice: &Invoice, ops: &mut Vec<Op>) {
    let bank = &invoice.bank;
    let mut lines = Vec::new();
    if !bank.name.is_empty() {
        lines.push(format!("Bank: {}", bank.name));
    }
    if !bank.account_title.is_empty() {
        lines.push(format!("Account Title: {}", bank.account_title));
    }
    if !bank.iban.is_empty() {
        lines.push(format!("IBAN: {}", bank.iban));
    }
    if !bank.account_number.is_empty() {
        lines.push(format!("Account Number: {}", bank.account_number));
    }
    if !bank.swift.is_empty() {
        lines.push(format!("SWIFT/BIC: {}", bank.swift));
    }
    if !bank.address.is_empty() {
        lines.push(format!("Address: {}", bank.address));
    }
    if lines.is_empty() {
        return;
    }

    ops.push(Op::Text {
        content: "BANK DETAILS".into(),
        style: TextStyle::bold(FontSize::Heading),
    });
    ops.push(Op::Gap { px: 6 });
    for line in lines {
        ops.push(Op::Text {
            content: line,
            style: TextStyle::default(),
        });
    }
}

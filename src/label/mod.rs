//! # Label Text Composer
//!
//! Turns a normalized [`LineItem`] into the text blocks printed on its
//! sticker. Block order is fixed and defines the top-to-bottom stacking:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Acme Tools                   │  header lines
//! │ PO Number: PO-99             │
//! │ ITEM NO: 3                   │
//! │ DPE ITEM CODE: FL-1          │
//! │ Weld neck flange 2in class   │  description (wrapped)
//! │ 150 RF                       │
//! │ PO QTY: 3 EA                 │  footer lines
//! │ HEAT NUMBER: HT9             │
//! │ MAKE: Acme                   │
//! │ CERTIFICATE NO: C-1          │
//! │ Remarks: Handle with care    │  remarks (optional)
//! └──────────────────────────────┘
//! ```

use crate::printer::HeightClass;
use crate::sheet::{LineItem, PreambleMetadata};

/// The composed text of one sticker and how many copies to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpec {
    pub header_lines: Vec<String>,
    pub description: String,
    pub footer_lines: Vec<String>,
    pub remarks: String,
    /// Physical copies, always in `1..=max_copies`
    pub copies: u32,
    pub height_class: HeightClass,
}

impl LabelSpec {
    /// Compose the label for one line item.
    ///
    /// The item's own PO number, when present, replaces the preamble's.
    pub fn compose(item: &LineItem, preamble: &PreambleMetadata, max_copies: u32) -> Self {
        Self {
            header_lines: header_lines(item, preamble),
            description: item.description.clone(),
            footer_lines: footer_lines(item),
            remarks: item.remarks.trim().to_string(),
            copies: copies_from_qty(&item.po_qty, max_copies),
            height_class: HeightClass::for_remarks(&item.remarks),
        }
    }

    /// The remarks block as printed, if there is one.
    pub fn remarks_line(&self) -> Option<String> {
        if self.remarks.is_empty() {
            None
        } else {
            Some(format!("Remarks: {}", self.remarks))
        }
    }
}

fn header_lines(item: &LineItem, preamble: &PreambleMetadata) -> Vec<String> {
    let mut lines = Vec::new();

    if !preamble.company.is_empty() {
        lines.push(preamble.company.clone());
    }

    let po = if item.po_number_override.is_empty() {
        &preamble.po_number
    } else {
        &item.po_number_override
    };
    if !po.is_empty() {
        lines.push(format!("PO Number: {}", po));
    }

    if !item.item_no.is_empty() {
        lines.push(format!("ITEM NO: {}", item.item_no));
    }
    if !item.dpe_code.is_empty() {
        lines.push(format!("DPE ITEM CODE: {}", item.dpe_code));
    }

    lines
}

fn footer_lines(item: &LineItem) -> Vec<String> {
    let mut lines = Vec::new();

    // Quantity and make are always printed so the sticker can be filled in by hand.
    if item.po_qty.is_empty() && item.uom.is_empty() {
        lines.push("PO QTY: ".to_string());
    } else {
        lines.push(format!("PO QTY: {} {}", item.po_qty, item.uom).trim().to_string());
    }

    if !item.heat_number.trim().is_empty() {
        lines.push(format!("HEAT NUMBER: {}", item.heat_number).trim().to_string());
    }

    if item.make.trim().is_empty() {
        lines.push("MAKE: ".to_string());
    } else {
        lines.push(format!("MAKE: {}", item.make).trim().to_string());
    }

    if !item.certificate_number.trim().is_empty() {
        lines.push(format!("CERTIFICATE NO: {}", item.certificate_number).trim().to_string());
    }

    lines
}

/// Number of physical copies for a quantity string.
///
/// Decimal quantities are truncated. Text that doesn't parse falls back to
/// its digits ("12 pcs" → 12); no digits at all means one copy. The result
/// is clamped to `1..=max_copies`.
pub fn copies_from_qty(qty: &str, max_copies: u32) -> u32 {
    let max = i64::from(max_copies.max(1));
    let qty = qty.trim();
    if qty.is_empty() {
        return 1;
    }

    let count = match qty.parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i64,
        _ => {
            let digits: String = qty.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                1
            } else {
                // Too many digits for i64 is still "more than max".
                digits.parse::<i64>().unwrap_or(i64::MAX)
            }
        }
    };

    count.clamp(1, max) as u32
}

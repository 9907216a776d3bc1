//! Field normalization: raw columns → canonical line-item fields.
//!
//! Purchase orders spell the same column many ways ("Heat No", "Heat
//! Number", "Qty", "PO Quantity"). Each canonical [`Field`] carries an
//! ordered alias list; [`get_field`] expands every alias with the
//! number↔no and qty↔quantity substitutions and returns the first
//! non-empty value it finds.

use regex::Regex;
use std::sync::OnceLock;

use super::table::Record;

/// Canonical line-item fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ItemNo,
    DpeCode,
    Description,
    PoNumber,
    PoQty,
    Uom,
    HeatNumber,
    CertificateNumber,
    Make,
    Remarks,
}

impl Field {
    /// Raw header aliases in priority order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::ItemNo => &["sl no", "item no", "item number"],
            Field::DpeCode => &["dpe item code", "dpe code"],
            Field::Description => &["description", "item description", "item name", "material"],
            Field::PoNumber => &["po number", "po no", "po"],
            Field::PoQty => &["po qty", "poqty", "po quantity", "qty", "quantity"],
            Field::Uom => &["uom", "unit"],
            Field::HeatNumber => &["heat number", "heat no", "heat"],
            Field::CertificateNumber => &["certificate number", "certificate no", "cert"],
            Field::Make => &["make", "manufacturer"],
            Field::Remarks => &["remarks", "remark"],
        }
    }

    /// Resolve this field from a row.
    pub fn resolve(&self, record: &Record<'_>) -> String {
        get_field(record, self.aliases())
    }
}

/// Spelling variants tried for one alias: as given, number→no, no→number,
/// qty→quantity, quantity→qty.
fn key_variants(key: &str) -> [String; 5] {
    let key = key.trim().to_lowercase();
    [
        key.clone(),
        key.replace("number", "no"),
        key.replace("no", "number"),
        key.replace("qty", "quantity"),
        key.replace("quantity", "qty"),
    ]
}

/// First non-empty value among the candidate keys and their variants.
///
/// Returns an empty string when no column matches.
pub fn get_field(record: &Record<'_>, candidate_keys: &[&str]) -> String {
    candidate_keys
        .iter()
        .filter(|key| !key.trim().is_empty())
        .flat_map(|key| key_variants(key))
        .filter_map(|variant| record.get(&variant))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Normalize a quantity for display.
///
/// Thousands separators are dropped; integral values lose their fraction
/// ("7.0" → "7"), other values lose trailing zeros ("2.50" → "2.5").
/// Text that isn't a number comes back trimmed but otherwise unchanged.
pub fn format_qty(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let n = match raw.replace(',', "").parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return raw.to_string(),
    };

    if n.fract() == 0.0 {
        if n == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", n);
    }

    let text = n.to_string();
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn dpe_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)DPE\s*Item\s*Code\s*[:\-]?\s*([A-Za-z0-9\-_/]+)").expect("dpe code regex")
    })
}

fn item_description_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)item\s*description\s*:?").expect("label regex"))
}

fn multi_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace regex"))
}

fn comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*,\s*").expect("comma regex"))
}

/// Pull a `DPE Item Code: XXX` token out of free text.
pub fn extract_dpe_code(text: &str) -> String {
    dpe_code_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Strip embedded labels and normalize whitespace in a description.
pub fn clean_description(text: &str) -> String {
    let text = dpe_code_re().replace_all(text, "");
    let text = item_description_label_re().replace_all(&text, "");
    let text = text.replace(['\r', '\n'], " ");
    let text = multi_space_re().replace_all(&text, " ");
    let text = comma_re().replace_all(&text, ", ");
    text.trim().to_string()
}

/// One normalized data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    pub item_no: String,
    pub dpe_code: String,
    pub description: String,
    /// Per-row PO number; takes precedence over the preamble's.
    pub po_number_override: String,
    /// Display-formatted quantity
    pub po_qty: String,
    pub uom: String,
    pub heat_number: String,
    pub certificate_number: String,
    pub make: String,
    pub remarks: String,
}

impl LineItem {
    /// Normalize a row. Returns `None` when the cleaned description is
    /// empty; such rows produce no label.
    pub fn from_record(record: &Record<'_>) -> Option<Self> {
        let description = clean_description(&Field::Description.resolve(record));
        if description.is_empty() {
            return None;
        }

        let dpe_code = match Field::DpeCode.resolve(record) {
            code if code.is_empty() => extract_dpe_code(&get_field(record, &["description"])),
            code => code,
        };

        Some(Self {
            item_no: Field::ItemNo.resolve(record),
            dpe_code,
            description,
            po_number_override: Field::PoNumber.resolve(record),
            po_qty: format_qty(&Field::PoQty.resolve(record)),
            uom: Field::Uom.resolve(record),
            heat_number: Field::HeatNumber.resolve(record),
            certificate_number: Field::CertificateNumber.resolve(record),
            make: Field::Make.resolve(record),
            remarks: Field::Remarks.resolve(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{RawSheet, Table};
    use pretty_assertions::assert_eq;

    fn table(header: &[&str], row: &[&str]) -> Table {
        let sheet = RawSheet::from_rows([header.to_vec(), row.to_vec()]);
        Table::from_sheet(&sheet, 0)
    }

    #[test]
    fn test_key_variants() {
        let variants = key_variants("Heat Number");
        assert!(variants.contains(&"heat number".to_string()));
        assert!(variants.contains(&"heat no".to_string()));
        let variants = key_variants("qty");
        assert!(variants.contains(&"quantity".to_string()));
    }

    #[test]
    fn test_get_field_matches_spelling_variants() {
        let t = table(&["Description", "PO", "Heat No", "Quantity"], &["Bolt", "1", "H-77", "12"]);
        let record = t.records().next().unwrap();
        assert_eq!(get_field(&record, &["heat number"]), "H-77");
        assert_eq!(get_field(&record, &["qty"]), "12");
    }

    #[test]
    fn test_get_field_priority_and_blank_skip() {
        let t = table(&["Description", "PO QTY", "Qty"], &["Bolt", " ", "5"]);
        let record = t.records().next().unwrap();
        // "po qty" exists but is blank, so the next alias wins
        assert_eq!(Field::PoQty.resolve(&record), "5");
    }

    #[test]
    fn test_get_field_missing_is_empty() {
        let t = table(&["Description", "PO"], &["Bolt", "1"]);
        let record = t.records().next().unwrap();
        assert_eq!(Field::Make.resolve(&record), "");
        assert_eq!(get_field(&record, &[]), "");
    }

    #[test]
    fn test_format_qty() {
        assert_eq!(format_qty("7.0"), "7");
        assert_eq!(format_qty("1,250"), "1250");
        assert_eq!(format_qty("2.50"), "2.5");
        assert_eq!(format_qty(" 12 "), "12");
        assert_eq!(format_qty("abc"), "abc");
        assert_eq!(format_qty("12 pcs"), "12 pcs");
        assert_eq!(format_qty(""), "");
        assert_eq!(format_qty("-0"), "0");
    }

    #[test]
    fn test_extract_dpe_code() {
        assert_eq!(extract_dpe_code("Gate valve DPE Item Code: DP-1002/A 2in"), "DP-1002/A");
        assert_eq!(extract_dpe_code("dpe item code 55"), "55");
        assert_eq!(extract_dpe_code("Gate valve"), "");
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(
            clean_description(
                "Item Description: Gate valve ,2in\r\n  class 150 DPE Item Code: DP-9"
            ),
            "Gate valve, 2in class 150"
        );
        assert_eq!(clean_description("  \n "), "");
        assert_eq!(clean_description("DPE Item Code: DP-9"), "");
    }

    #[test]
    fn test_line_item_from_record() {
        let t = table(
            &[
                "Sl No", "Item Description", "PO No", "PO Qty", "UOM",
                "Heat Number", "Cert", "Manufacturer", "Remark",
            ],
            &[
                "3", "Flange DPE Item Code: FL-1", "PO-7", "1,000.0", "EA",
                "HT9", "C-1", "Acme", "Handle with care",
            ],
        );
        let item = LineItem::from_record(&t.records().next().unwrap()).unwrap();
        assert_eq!(
            item,
            LineItem {
                item_no: "3".into(),
                dpe_code: "".into(),
                description: "Flange".into(),
                po_number_override: "PO-7".into(),
                po_qty: "1000".into(),
                uom: "EA".into(),
                heat_number: "HT9".into(),
                certificate_number: "C-1".into(),
                make: "Acme".into(),
                remarks: "Handle with care".into(),
            }
        );
    }

    #[test]
    fn test_dpe_code_falls_back_to_description_column() {
        let t = table(&["Description", "PO"], &["Valve DPE Item Code: V-22", "1"]);
        let item = LineItem::from_record(&t.records().next().unwrap()).unwrap();
        assert_eq!(item.dpe_code, "V-22");
        assert_eq!(item.description, "Valve");
    }

    #[test]
    fn test_empty_description_dropped() {
        let t = table(&["Description", "PO"], &["Item Description:", "PO-1"]);
        assert!(LineItem::from_record(&t.records().next().unwrap()).is_none());
    }
}

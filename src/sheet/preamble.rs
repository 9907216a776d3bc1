//! Preamble parsing: company name and purchase-order number.
//!
//! The rows above the header are free text. Each non-empty row is reduced
//! to a single line and run through [`PREAMBLE_RULES`] in order; a rule
//! that matches overwrites its slot. After the scan the company name goes
//! through [`guard_company`], which replaces the supplier's own "MSG"
//! reference with the actual customer where one can be found.
//!
//! ```text
//! "Client: Acme Tools"        → company = "Acme Tools"
//! "Gulf Pipe Fittings LLC"    → company = "Gulf Pipe Fittings LLC" (guess)
//! "PO Number: 4500-17/B"      → po_number = "4500-17/B"
//! ```

use regex::Regex;
use std::sync::OnceLock;

use super::RawSheet;

/// Company shown when nothing usable is found.
pub const COMPANY_FALLBACK: &str = "Client: N/A";

/// Free-text metadata found above the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreambleMetadata {
    pub company: String,
    pub po_number: String,
}

/// Metadata field a rule writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Company,
    PoNumber,
}

impl PreambleMetadata {
    fn set(&mut self, slot: Slot, value: String) {
        match slot {
            Slot::Company => self.company = value,
            Slot::PoNumber => self.po_number = value,
        }
    }
}

/// One extraction rule. `extract` returns the value to store, or `None`
/// to leave the slot untouched.
#[derive(Clone, Copy)]
pub struct PreambleRule {
    pub name: &'static str,
    pub slot: Slot,
    pub extract: fn(&str) -> Option<String>,
}

/// Rules applied to every preamble line, in this order.
///
/// Later lines overwrite earlier ones for every slot, so the last labeled
/// company and the last PO number in the preamble win. An unlabeled guess
/// survives only if no later line sets the company.
pub const PREAMBLE_RULES: [PreambleRule; 3] = [
    PreambleRule {
        name: "labeled company",
        slot: Slot::Company,
        extract: labeled_company,
    },
    PreambleRule {
        name: "company guess",
        slot: Slot::Company,
        extract: guessed_company,
    },
    PreambleRule {
        name: "po number",
        slot: Slot::PoNumber,
        extract: po_number,
    },
];

fn company_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(client|company)\s*[:\-]\s*(.+)").expect("company label regex")
    })
}

fn customer_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(client|customer|company|customer name)\s*[:\-]\s*(.+)")
            .expect("customer label regex")
    })
}

fn po_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)PO\s*Number\s*[:\-]\s*([A-Za-z0-9\-_/]+)").expect("po number regex")
    })
}

/// `Client: X` / `Company - X`
fn labeled_company(line: &str) -> Option<String> {
    company_label_re()
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
}

/// A longer unlabeled line that doesn't mention a PO is probably the
/// customer's name.
fn guessed_company(line: &str) -> Option<String> {
    if labeled_company(line).is_none()
        && word_count(line) > 2
        && !line.to_lowercase().contains("po")
    {
        Some(line.trim().to_string())
    } else {
        None
    }
}

fn po_number(line: &str) -> Option<String> {
    po_number_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn customer_label(line: &str) -> Option<String> {
    customer_label_re()
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
}

fn word_count(line: &str) -> usize {
    line.split_whitespace().count()
}

/// Trim every cell, drop blanks and literal "nan" placeholders, and join
/// the rest with single spaces.
pub fn safe_join(row: &[String]) -> String {
    row.iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case("nan"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Non-empty joined lines strictly above the header row.
pub fn preamble_lines(sheet: &RawSheet, header_row: usize) -> Vec<String> {
    sheet
        .rows()
        .iter()
        .take(header_row)
        .map(|row| safe_join(row))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Scan the preamble for company and PO number.
pub fn extract_preamble(sheet: &RawSheet, header_row: usize) -> PreambleMetadata {
    let lines = preamble_lines(sheet, header_row);
    let mut meta = PreambleMetadata::default();

    for line in &lines {
        for rule in &PREAMBLE_RULES {
            if let Some(value) = (rule.extract)(line) {
                meta.set(rule.slot, value);
            }
        }
    }

    meta.company = guard_company(&meta.company, &lines);
    meta
}

/// Resolve the final company name from the scanned candidate.
///
/// A candidate mentioning "msg" is the supplier's own reference, not the
/// customer. It is replaced by the first customer/client/company label in
/// the preamble, then by the first long line mentioning neither "msg" nor
/// "po". If both come up empty the original candidate is kept when it
/// mentions "msg" or "reference"; otherwise the result is
/// [`COMPANY_FALLBACK`].
pub fn guard_company(candidate: &str, lines: &[String]) -> String {
    let mut company = candidate.to_string();

    if !company.is_empty() && company.to_lowercase().contains("msg") {
        company = lines
            .iter()
            .find_map(|line| customer_label(line))
            .or_else(|| {
                lines
                    .iter()
                    .find(|line| {
                        let low = line.to_lowercase();
                        !low.contains("msg") && !low.contains("po") && word_count(line) > 2
                    })
                    .map(|line| line.trim().to_string())
            })
            .unwrap_or_default();
    }

    if company.is_empty() {
        let low = candidate.to_lowercase();
        if !candidate.is_empty() && (low.contains("msg") || low.contains("reference")) {
            return candidate.to_string();
        }
        return COMPANY_FALLBACK.to_string();
    }

    company
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet(lines: &[&str]) -> RawSheet {
        RawSheet::from_rows(lines.iter().map(|l| vec![*l]))
    }

    fn meta(lines: &[&str]) -> PreambleMetadata {
        extract_preamble(&sheet(lines), lines.len())
    }

    #[test]
    fn test_labeled_company_and_po() {
        let m = meta(&["Company: Acme Tools", "PO Number: PO-99"]);
        assert_eq!(m.company, "Acme Tools");
        assert_eq!(m.po_number, "PO-99");
    }

    #[test]
    fn test_labeled_beats_earlier_guess() {
        let m = meta(&["Gulf Pipe Fittings LLC", "Client - Acme Tools"]);
        assert_eq!(m.company, "Acme Tools");
    }

    #[test]
    fn test_later_guess_overwrites_label() {
        // Every matching line overwrites the slot; scan order decides.
        let m = meta(&["Client: Acme Tools", "Delivery to Jebel Ali warehouse"]);
        assert_eq!(m.company, "Delivery to Jebel Ali warehouse");
    }

    #[test]
    fn test_short_lines_are_not_guessed() {
        let m = meta(&["Acme Tools"]);
        assert_eq!(m.company, COMPANY_FALLBACK);
    }

    #[test]
    fn test_lines_with_po_are_not_guessed() {
        let m = meta(&["Supply of PO items for rig"]);
        assert_eq!(m.company, COMPANY_FALLBACK);
    }

    #[test]
    fn test_last_po_number_wins() {
        let m = meta(&["PO Number: 111", "PO Number - 222/A"]);
        assert_eq!(m.po_number, "222/A");
    }

    #[test]
    fn test_po_number_without_match_is_empty() {
        let m = meta(&["Company: Acme Tools", "PO: 123"]);
        assert_eq!(m.po_number, "");
    }

    #[test]
    fn test_nan_cells_are_ignored() {
        let sheet = RawSheet::from_rows([vec!["nan", " Company: Acme ", "NaN", ""]]);
        assert_eq!(safe_join(&sheet.rows()[0]), "Company: Acme");
        assert_eq!(extract_preamble(&sheet, 1).company, "Acme");
    }

    #[test]
    fn test_only_rows_above_header_are_scanned() {
        let sheet = sheet(&["Company: Acme", "Description PO", "Company: Other"]);
        assert_eq!(extract_preamble(&sheet, 1).company, "Acme");
    }

    #[test]
    fn test_msg_guard_prefers_customer_label() {
        let m = meta(&[
            "Customer Name: Gulf Drilling",
            "MSG Oilfield Equipment Trading",
        ]);
        assert_eq!(m.company, "Gulf Drilling");
    }

    #[test]
    fn test_msg_guard_falls_back_to_long_line() {
        let m = meta(&[
            "Abu Dhabi Marine Operating Company",
            "MSG Oilfield Equipment Trading",
        ]);
        assert_eq!(m.company, "Abu Dhabi Marine Operating Company");
    }

    #[test]
    fn test_msg_guard_keeps_reference_as_last_resort() {
        let m = meta(&["MSG reference 2024 batch"]);
        assert_eq!(m.company, "MSG reference 2024 batch");
    }

    #[test]
    fn test_nothing_usable_gives_fallback() {
        assert_eq!(meta(&[]).company, COMPANY_FALLBACK);
        assert_eq!(guard_company("", &[]), COMPANY_FALLBACK);
    }

    #[test]
    fn test_deterministic() {
        let lines = ["MSG Oilfield Equipment Trading", "Client: Gulf Drilling"];
        assert_eq!(meta(&lines), meta(&lines));
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = PREAMBLE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["labeled company", "company guess", "po number"]);
    }
}

//! Header row detection.
//!
//! The column-header row is the first row whose joined, lower-cased text
//! mentions both a description column and a PO column. Matching is plain
//! substring search, so "PO Number", "PO No" and "PO Qty" all count.

use super::RawSheet;
use crate::error::EtiquetaError;

/// Join a row's cells lower-cased with single spaces.
fn signature(row: &[String]) -> String {
    row.iter()
        .map(|cell| cell.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a row looks like the column-header row.
pub fn is_header_row(row: &[String]) -> bool {
    let line = signature(row);
    line.contains("description") && (line.contains("po") || line.contains("po number"))
}

/// Find the index of the column-header row.
///
/// Scans top to bottom and returns the first match. A sheet without one is
/// a malformed template and fails with [`EtiquetaError::HeaderNotFound`].
pub fn locate_header(sheet: &RawSheet) -> Result<usize, EtiquetaError> {
    sheet
        .rows()
        .iter()
        .position(|row| is_header_row(row))
        .ok_or(EtiquetaError::HeaderNotFound)
}

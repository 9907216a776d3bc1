//! # Spreadsheet Intake
//!
//! Turns an uploaded purchase-order workbook into label input:
//!
//! ```text
//! Workbook → RawSheet → header row → preamble (company, PO)
//!                                  → table → LineItem per data row
//! ```
//!
//! The header row position and the column vocabulary differ from one
//! customer template to the next, so nothing here assumes a fixed schema.

pub mod fields;
pub mod header;
pub mod preamble;
pub mod table;

pub use fields::{LineItem, clean_description, extract_dpe_code, format_qty, get_field};
pub use header::locate_header;
pub use preamble::{PreambleMetadata, extract_preamble};
pub use table::{Record, Table};

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use std::path::Path;

use crate::error::EtiquetaError;

/// An ordered grid of cell text with no schema.
///
/// Empty cells are stored as empty strings. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// Create a sheet from rows of cell text.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a sheet from anything string-like.
    ///
    /// ```
    /// use etiqueta::sheet::RawSheet;
    ///
    /// let sheet = RawSheet::from_rows([
    ///     vec!["Company: Acme Tools"],
    ///     vec!["Description", "PO Number", "Qty"],
    /// ]);
    /// assert_eq!(sheet.len(), 2);
    /// ```
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read the first worksheet of a workbook (xlsx, xlsm, xls, xlsb, ods).
///
/// Rows and columns before the used range are padded with empty cells so
/// row indices match what the user sees in their spreadsheet application.
pub fn load_workbook(path: &Path) -> Result<RawSheet, EtiquetaError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| EtiquetaError::Sheet(format!("Failed to open {}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EtiquetaError::Sheet(format!("{} has no worksheets", path.display())))?
        .map_err(|e| EtiquetaError::Sheet(format!("Failed to read {}: {}", path.display(), e)))?;

    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }

    tracing::debug!(rows = rows.len(), "loaded {}", path.display());
    Ok(RawSheet::new(rows))
}

/// Render a cell the way a string-typed spreadsheet read would show it.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt: NaiveDateTime| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Integral floats print without a fractional part ("3" rather than "3.0").
fn format_number(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

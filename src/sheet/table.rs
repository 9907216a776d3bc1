//! Tabular view of the rows below the header.
//!
//! Column names are the header cells trimmed and lower-cased. Blank header
//! cells become `unnamed: {index}` and repeated names get a `.1`, `.2`, …
//! suffix, so every column stays addressable and the first occurrence of a
//! name keeps the plain spelling.

use std::collections::HashMap;

use super::RawSheet;

/// Data rows with named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build the table whose header is `sheet[header_row]`.
    ///
    /// Rows where every cell is blank are dropped.
    pub fn from_sheet(sheet: &RawSheet, header_row: usize) -> Self {
        let header = sheet.row(header_row).unwrap_or(&[]);
        let columns = column_names(header);

        let rows = sheet
            .rows()
            .iter()
            .skip(header_row + 1)
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .cloned()
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the data rows in sheet order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            columns: &self.columns,
            values,
        })
    }
}

/// One data row, addressable by lower-cased column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    /// Value under `column`, or `None` when the sheet has no such column.
    ///
    /// Cells past the end of a short row read as empty.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.columns.iter().position(|c| c == column)?;
        Some(self.values.get(index).map(String::as_str).unwrap_or(""))
    }
}

fn column_names(header: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = match cell.trim().to_lowercase() {
                name if name.is_empty() => format!("unnamed: {}", index),
                name => name,
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

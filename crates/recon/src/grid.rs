//! Parsed workbook: ordered, named 2-D grids of cell text.
//!
//! Loaders (xlsx, csv) flatten every cell to its display text before the
//! engine sees it. Row and column indices are absolute sheet positions, so a
//! sheet whose used range starts at C5 still has its first value at `[4][2]`.

use serde::Serialize;

/// One sheet as rows of cell text. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self { name: name.into(), rows }
    }

    /// Build a grid from string slices. Handy for fixtures.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self { name: name.into(), rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    /// Trimmed cell text, "" when the row or column is out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.trim())
            .unwrap_or("")
    }
}

/// A whole workbook in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    pub file_name: String,
    pub sheets: Vec<SheetGrid>,
}

impl Workbook {
    pub fn new(file_name: impl Into<String>, sheets: Vec<SheetGrid>) -> Self {
        Self { file_name: file_name.into(), sheets }
    }
}

/// Uppercased, trimmed header texts for a row.
pub(crate) fn header_texts(row: &[String]) -> Vec<String> {
    row.iter().map(|h| h.trim().to_uppercase()).collect()
}

/// Index of the first header (left to right) containing any of `terms`.
pub(crate) fn find_column(headers: &[String], terms: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| !h.is_empty() && terms.iter().any(|t| h.contains(t)))
}

/// True if any cell in the row contains one of `markers` (case-insensitive).
pub(crate) fn row_has_marker(row: &[String], markers: &[&str]) -> bool {
    row.iter().any(|cell| {
        let upper = cell.to_uppercase();
        !upper.is_empty() && markers.iter().any(|m| upper.contains(m))
    })
}

// Excel import (xlsx, xlsm, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use manning_recon::{SheetGrid, Workbook};
use tracing::{debug, warn};

use crate::{file_label, LoadError};

/// Rows kept per sheet. Manning files are a few thousand rows at most;
/// anything past this is almost certainly formatting debris.
pub const MAX_ROWS: usize = 100_000;
pub const MAX_COLS: usize = 256;

/// Display text for one calamine cell.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Integers without decimals, so "1001" stays "1001" and not "1001.0"
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        // Serial number, 1900 date system
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Load every sheet of an Excel-family workbook as a text grid.
pub fn load(path: &Path) -> Result<Workbook, LoadError> {
    let mut book: Sheets<_> =
        open_workbook_auto(path).map_err(|e| LoadError::Open(e.to_string()))?;

    let sheet_names: Vec<String> = book.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(LoadError::NoSheets);
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = book.worksheet_range(name).map_err(|e| LoadError::Sheet {
            sheet: name.clone(),
            message: e.to_string(),
        })?;

        let (height, width) = range.get_size();
        if height > MAX_ROWS || width > MAX_COLS {
            warn!(
                sheet = %name,
                rows = height,
                cols = width,
                "sheet truncated to {}x{}",
                MAX_ROWS,
                MAX_COLS
            );
        }

        // Range start offset (data may not begin at A1)
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let (start_row, start_col) = (start_row as usize, start_col as usize);

        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row.min(MAX_ROWS)];
        for row in range.rows() {
            if rows.len() >= MAX_ROWS {
                break;
            }
            let mut cells = vec![String::new(); start_col.min(MAX_COLS)];
            cells.extend(
                row.iter()
                    .take(MAX_COLS.saturating_sub(start_col))
                    .map(cell_text),
            );
            while cells.last().is_some_and(|c| c.is_empty()) {
                cells.pop();
            }
            rows.push(cells);
        }

        debug!(sheet = %name, rows = rows.len(), "sheet loaded");
        sheets.push(SheetGrid::new(name.clone(), rows));
    }

    Ok(Workbook::new(file_label(path), sheets))
}

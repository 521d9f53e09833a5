// Workbook loading

pub mod csv;
pub mod xlsx;

use std::path::Path;

use manning_recon::Workbook;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open workbook: {0}")]
    Open(String),

    #[error("failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("malformed CSV: {0}")]
    Csv(String),

    #[error("unsupported file type '{0}' (expected xlsx, xlsm, xls, xlsb, ods, csv or tsv)")]
    Unsupported(String),
}

/// Load any supported workbook, dispatching on the file extension.
pub fn load(path: &Path) -> Result<Workbook, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::load(path),
        "csv" => csv::load(path),
        "tsv" => csv::load_with_delimiter(path, b'\t'),
        other => Err(LoadError::Unsupported(other.to_string())),
    }
}

/// File name used to label a loaded workbook.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loader errors – all of these are fatal at startup
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("unsupported input extension: .{0}")]
    UnsupportedExtension(String),

    #[error("sheet '{sheet}' not found (available: {})", .available.join(", "))]
    MissingSheet {
        sheet: String,
        available: Vec<String>,
    },

    #[error("cannot read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("cannot read CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Export errors – reported in the UI, never fatal
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("writing export file: {0}")]
    Io(#[from] std::io::Error),
}

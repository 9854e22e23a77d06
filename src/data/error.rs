use std::path::PathBuf;

use thiserror::Error;

/// Failures while locating the literature table inside a source file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("sheet '{sheet}' not found in {path}; available sheets: {available:?}")]
    UnknownSheet {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("source has no header row")]
    NoHeader,
}

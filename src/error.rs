//! Error types for the preprocessing layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by every data and infra operation.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Everything that can go wrong while loading samples or encoding them.
#[derive(Error, Debug)]
pub enum PrepError {
    /// The sample source was pointed at something that is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The tabular file could not be opened.
    #[error("Cannot open '{}': {source}", .path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tabular file is malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("Column '{column}' not found in '{}'", .path.display())]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
        /// File whose header was inspected.
        path: PathBuf,
    },

    /// Row lookup past the end of the table.
    #[error("Index {index} out of range for dataset of {len} rows")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rows loaded.
        len: usize,
    },

    /// Failure reported by the tokenizer collaborator.
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error types for the bank operations pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while loading, transforming or rendering records.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Card or account number failed the length/digit constraints
    #[error("Invalid {kind} number: {reason}")]
    InvalidFormat { kind: &'static str, reason: String },

    /// Masking dispatch got nothing to work with (absent, empty or blank)
    #[error("Malformed identifier: {0}")]
    MalformedInput(String),

    /// A record required by the operation lacks the given key
    #[error("Record at position {index} has no '{key}' field")]
    MissingKey { key: &'static str, index: usize },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// XLSX workbook could not be opened or its worksheet read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// Input file extension has no loader
    #[error("Unsupported input format '{0}', expected .json, .csv or .xlsx")]
    UnsupportedFormat(String),

    /// State requested on the command line is not a known operation state
    #[error("Unknown operation state '{0}', expected one of EXECUTED, CANCELED, PENDING")]
    UnknownState(String),
}

//! Error types for sheet aggregation.

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that abort an aggregation run
#[derive(Debug, Error)]
pub enum DataError {
    /// Sheet catalog missing or unreadable
    #[error("Could not read input file at {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Sheet catalog is not valid JSON for the expected shape
    #[error("Malformed sheet configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Source file or directory not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A sheet has no column letters to fetch
    #[error("Sheet {0} has no column references")]
    NoColumns(String),

    /// Start row is not a positive row number
    #[error("Invalid start row '{row}' for sheet {sheet}")]
    InvalidStartRow { sheet: String, row: String },

    /// Malformed row exclusion spec
    #[error("Could not convert '{term}' to an integer in exclusion spec '{spec}'")]
    ExclusionParse { spec: String, term: String },

    /// Invalid range specification
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The fetch collaborator failed
    #[error("Cannot retrieve data for {sheet}: {message}")]
    Fetch { sheet: String, message: String },

    /// Output stream failure
    #[error("Could not write data for {sheet} to file: {message}")]
    Write { sheet: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DataError {
    /// Wrap a source failure for the given sheet as a fetch error
    pub fn fetch(sheet: impl Into<String>, err: impl std::fmt::Display) -> Self {
        DataError::Fetch {
            sheet: sheet.into(),
            message: err.to_string(),
        }
    }
}

//! Error types for the data-loader crate.
//!
//! Only structural problems end up here. A record whose year field holds
//! several comma-separated values is not an error: the parser skips it.

use thiserror::Error;

/// Errors that can occur while loading a movie catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in the data file couldn't be parsed
    ///
    /// Carries the file name and 1-based line number so the caller can
    /// point at the offending record.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        #[source]
        reason: RecordError,
    },
}

/// Why a single record does not have the `Title (Year)/Last, First/...` shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing '(' in title field {field:?}")]
    MissingYearOpen { field: String },

    #[error("Missing ')' after year in {field:?}")]
    MissingYearClose { field: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

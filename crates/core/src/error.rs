//! Error types for the normalization pipeline

use thiserror::Error;

/// Core pipeline errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] arxprep_formats::Error),

    #[error(transparent)]
    Filter(#[from] arxprep_filters::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: field `{field}` should be {expected}, found {found}")]
    InvalidField {
        line: usize,
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Line {line}: cannot parse update_date {value:?}")]
    InvalidDate { line: usize, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for cleaning rules

use thiserror::Error;

/// Cleaning rule errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for filter operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error taxonomy for the core crate.
//!
//! Empty results ("no quiz blocks found", "no chunks") are never errors.
//! Errors are reserved for input that is not text and for configuration
//! values outside their valid range.

/// Errors surfaced by the core text-processing functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudyError {
    /// The input was not text (or was absent) where text is required.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A numeric or state parameter was outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, StudyError>;

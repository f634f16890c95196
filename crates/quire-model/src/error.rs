//! Error types for the model crate.

use thiserror::Error;

use crate::json::ParseError;

/// Errors that can occur when reading, building or parsing models.
///
/// A missing key is never an error: lookups return `Option` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A value exists under the key but is not of the requested kind.
    #[error("type mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Text is not a decimal number of the form `-?digits(.digits)?`.
    #[error("invalid number literal: {0:?}")]
    InvalidNumber(String),

    /// JSON text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

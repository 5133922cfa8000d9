//! Errors raised when a value breaks the city-ops contract.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CityOpsError {
    /// A string is not part of a closed vocabulary.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant {
        field: &'static str,
        kind: &'static str,
        value: String,
    },

    /// A number, coordinate or length is outside its allowed range.
    #[error("{message}")]
    OutOfRange { field: &'static str, message: String },

    /// Pagination bounds violated.
    #[error("{0}")]
    InvalidPage(String),
}

impl CityOpsError {
    #[must_use]
    pub fn out_of_range(field: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending field, if the error is tied to one.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::UnknownVariant { field, .. } | Self::OutOfRange { field, .. } => Some(*field),
            Self::InvalidPage(_) => None,
        }
    }
}

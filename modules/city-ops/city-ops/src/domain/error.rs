use city_ops_sdk::CityOpsError;
use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    InvalidParameter { message: String },

    #[error("{message}")]
    Conflict { field: &'static str, message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{feature} is not implemented")]
    Unimplemented { feature: &'static str },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    #[must_use]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            field,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unimplemented(feature: &'static str) -> Self {
        Self::Unimplemented { feature }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Contract violations from the SDK surface as field validation failures,
/// except pagination bounds which keep their own kind.
impl From<CityOpsError> for DomainError {
    fn from(e: CityOpsError) -> Self {
        match e {
            CityOpsError::InvalidPage(message) => Self::InvalidParameter { message },
            other => {
                let field = other.field().unwrap_or("body");
                Self::validation(field, other.to_string())
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use city_ops_sdk::{AssetStatus, PageRequest};

    #[test]
    fn not_found_message_names_entity() {
        let e = DomainError::not_found("Asset", Uuid::nil());
        assert_eq!(e.to_string(), "Asset not found");
    }

    #[test]
    fn enum_parse_error_becomes_validation() {
        let e: DomainError = "bogus".parse::<AssetStatus>().unwrap_err().into();
        match e {
            DomainError::Validation { field, message } => {
                assert_eq!(field, "status");
                assert!(message.contains("bogus"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn page_error_becomes_invalid_parameter() {
        let e: DomainError = PageRequest::new(0, 500, 100).unwrap_err().into();
        assert!(matches!(e, DomainError::InvalidParameter { .. }));
    }
}

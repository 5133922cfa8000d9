//! REST error mapping for the city-ops module.

use civitas_errors::{ErrDef, Problem, ValidationViolation};

use crate::domain::error::DomainError;

/// Handler result: any error leaves as an `application/problem+json` body.
pub type ApiResult<T> = Result<T, Problem>;

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let trace_id = tracing::Span::current()
            .id()
            .map(|id| id.into_u64().to_string());

        let problem = match &e {
            DomainError::NotFound { .. } => ErrDef::NOT_FOUND.as_problem(e.to_string()),
            DomainError::Validation { field, message } => ErrDef::VALIDATION
                .as_problem(e.to_string())
                .with_errors(vec![ValidationViolation::new(field.clone(), message.clone())]),
            DomainError::InvalidParameter { message } => {
                ErrDef::INVALID_PARAMETER.as_problem(message.clone())
            }
            DomainError::Conflict { field, message } => ErrDef::CONFLICT
                .as_problem(message.clone())
                .with_errors(vec![ValidationViolation::new(*field, message.clone())]),
            DomainError::Unauthorized { message } => {
                ErrDef::UNAUTHORIZED.as_problem(message.clone())
            }
            DomainError::Unimplemented { .. } => ErrDef::NOT_IMPLEMENTED.as_problem(e.to_string()),
            DomainError::Database { .. } => {
                tracing::error!(error = %e, "Database error in city_ops");
                ErrDef::INTERNAL.as_problem("An internal error occurred")
            }
            DomainError::Internal { .. } => {
                tracing::error!(error = %e, "Internal error in city_ops");
                ErrDef::INTERNAL.as_problem("An internal error occurred")
            }
        };

        match trace_id {
            Some(id) => problem.with_trace_id(id),
            None => problem,
        }
    }
}

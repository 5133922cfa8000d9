//! Problem kinds understood by CivitasIQ clients.

use crate::problem::Problem;
use http::StatusCode;

const TYPE_BASE: &str = "https://errors.civitasiq.dev/";

/// Static problem definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub code: &'static str,
}

impl ErrDef {
    pub const NOT_FOUND: Self = Self {
        status: StatusCode::NOT_FOUND,
        title: "Not Found",
        code: "NOT_FOUND",
    };
    pub const VALIDATION: Self = Self {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        title: "Validation Error",
        code: "VALIDATION_ERROR",
    };
    pub const INVALID_PARAMETER: Self = Self {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        title: "Invalid Parameter",
        code: "INVALID_PARAMETER",
    };
    pub const CONFLICT: Self = Self {
        status: StatusCode::CONFLICT,
        title: "Conflict",
        code: "CONFLICT",
    };
    pub const UNAUTHORIZED: Self = Self {
        status: StatusCode::UNAUTHORIZED,
        title: "Unauthorized",
        code: "UNAUTHORIZED",
    };
    pub const NOT_IMPLEMENTED: Self = Self {
        status: StatusCode::NOT_IMPLEMENTED,
        title: "Not Implemented",
        code: "NOT_IMPLEMENTED",
    };
    pub const SERVICE_UNAVAILABLE: Self = Self {
        status: StatusCode::SERVICE_UNAVAILABLE,
        title: "Service Unavailable",
        code: "SERVICE_UNAVAILABLE",
    };
    pub const INTERNAL: Self = Self {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Internal Server Error",
        code: "INTERNAL_ERROR",
    };

    /// Type URI for this kind, e.g. `https://errors.civitasiq.dev/not-found`.
    #[must_use]
    pub fn type_url(&self) -> String {
        format!("{TYPE_BASE}{}", self.code.to_ascii_lowercase().replace('_', "-"))
    }

    /// Convert this definition into a Problem with the given detail.
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(self.status, self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn not_found_problem_carries_detail() {
        let problem = ErrDef::NOT_FOUND.as_problem("Asset not found");
        assert_eq!(problem.status, StatusCode::NOT_FOUND);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Asset not found");
        assert_eq!(problem.code, "NOT_FOUND");
        assert_eq!(problem.type_url, "https://errors.civitasiq.dev/not-found");
    }

    #[test]
    fn pagination_and_validation_share_status() {
        assert_eq!(ErrDef::INVALID_PARAMETER.status, ErrDef::VALIDATION.status);
        assert_ne!(ErrDef::INVALID_PARAMETER.code, ErrDef::VALIDATION.code);
    }

    #[test]
    fn type_url_is_kebab_case() {
        assert_eq!(
            ErrDef::SERVICE_UNAVAILABLE.type_url(),
            "https://errors.civitasiq.dev/service-unavailable"
        );
    }
}

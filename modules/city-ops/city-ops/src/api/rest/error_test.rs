#![allow(clippy::unwrap_used, clippy::expect_used)]

use civitas_errors::Problem;
use http::StatusCode;
use tracing_test::traced_test;
use uuid::Uuid;

use crate::domain::error::DomainError;

#[test]
fn not_found_detail_names_entity() {
    let p: Problem = DomainError::not_found("Incident", Uuid::now_v7()).into();
    assert_eq!(p.status, StatusCode::NOT_FOUND);
    assert_eq!(p.detail, "Incident not found");
    assert_eq!(p.code, "NOT_FOUND");
}

#[test]
fn validation_carries_field_violation() {
    let p: Problem = DomainError::validation("confidence", "must be within [0, 1]").into();
    assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = p.errors.expect("violations");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "confidence");
}

#[test]
fn pagination_error_is_unprocessable() {
    let p: Problem = DomainError::invalid_parameter("limit must be between 1 and 100").into();
    assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(p.code, "INVALID_PARAMETER");
}

#[test]
fn status_per_kind() {
    let cases = [
        (DomainError::conflict("domain", "taken"), StatusCode::CONFLICT),
        (DomainError::unauthorized("nope"), StatusCode::UNAUTHORIZED),
        (
            DomainError::unimplemented("Token refresh"),
            StatusCode::NOT_IMPLEMENTED,
        ),
    ];
    for (err, status) in cases {
        let p: Problem = err.into();
        assert_eq!(p.status, status);
    }
}

#[test]
#[traced_test]
fn infrastructure_details_are_logged_not_returned() {
    let p: Problem = DomainError::database("connection refused on 10.0.0.3").into();
    assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!p.detail.contains("10.0.0.3"));
    assert!(logs_contain("connection refused on 10.0.0.3"));
}

//! RFC 9457 Problem Details document.

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// Error body returned for every failed request.
///
/// `detail` always carries the human-readable message, e.g. `"Asset not found"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct Problem {
    /// URI reference identifying the problem kind.
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    /// Serialized as the numeric HTTP status.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    pub detail: String,
    /// Request path that produced the problem, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Machine-readable code, stable across releases.
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Per-field violations for 422 responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationViolation>>,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Field path, e.g. `"status"` or `"location.coordinates"`.
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationViolation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: None,
            code: String::new(),
            trace_id: None,
            errors: None,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<ValidationViolation>) -> Self {
        if !errors.is_empty() {
            self.errors = Some(errors);
        }
        self
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{HeaderValue, header};

        let status = self.status;
        if status.is_server_error() {
            tracing::debug!(code = %self.code, detail = %self.detail, "returning server problem");
        }
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        if status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let p = Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Validation Error",
            "Request validation failed",
        )
        .with_code("VALIDATION_ERROR")
        .with_instance("/api/v1/assets")
        .with_trace_id("req-456")
        .with_errors(vec![ValidationViolation::new("status", "unknown asset status 'bogus'")]);

        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.code, "VALIDATION_ERROR");
        assert_eq!(p.instance.as_deref(), Some("/api/v1/assets"));
        assert_eq!(p.trace_id.as_deref(), Some("req-456"));
        assert_eq!(p.errors.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn unset_instance_is_omitted() {
        let p = Problem::new(StatusCode::CONFLICT, "Conflict", "Domain already registered");
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("instance").is_none());

        let back: Problem = serde_json::from_value(json).unwrap();
        assert_eq!(back.instance, None);
    }

    #[test]
    fn empty_violation_list_is_omitted() {
        let p = Problem::new(StatusCode::UNPROCESSABLE_ENTITY, "Invalid", "x").with_errors(vec![]);
        assert!(p.errors.is_none());
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn serializes_status_as_number_and_detail_as_message() {
        let p = Problem::new(StatusCode::NOT_FOUND, "Not Found", "Incident not found");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["detail"], "Incident not found");
        assert_eq!(json["type"], "about:blank");
    }

    #[test]
    fn deserializes_minimal_document() {
        let json = r#"{"type":"about:blank","title":"Not Found","status":404,"detail":"Alert not found"}"#;
        let p: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.detail, "Alert not found");
        assert!(p.code.is_empty());
    }
}

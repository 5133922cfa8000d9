//! Field constraints shared by the services.
//!
//! Checks run before any write; the first violation rejects the whole operation.

use city_ops_sdk::models::{
    AlertPatch, AssetPatch, IncidentPatch, NewAlert, NewAsset, NewIncident, NewRecommendation,
    NewTenant, NewUser, RecommendationPatch, TenantPatch, UserPatch,
};

use super::error::DomainError;

pub const NAME_MAX: usize = 255;
pub const TYPE_MAX: usize = 100;
pub const PASSWORD_MIN: usize = 8;

/// Length in characters must be in `[min, max]`; `max = None` means unbounded.
pub fn check_len(
    field: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min {
        return Err(DomainError::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if let Some(max) = max
        && len > max
    {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max} characters, got {len}"),
        ));
    }
    Ok(())
}

fn check_opt_len(
    field: &str,
    value: Option<&String>,
    min: usize,
    max: Option<usize>,
) -> Result<(), DomainError> {
    value.map_or(Ok(()), |v| check_len(field, v, min, max))
}

pub fn check_confidence(confidence: f64) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "confidence",
            format!("must be between 0.0 and 1.0, got {confidence}"),
        ))
    }
}

/// Trims and lowercases an address after a structural check.
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim();
    let invalid = || DomainError::validation("email", format!("'{email}' is not a valid email"));
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    if !well_formed {
        return Err(invalid());
    }
    check_len("email", email, 3, Some(NAME_MAX))?;
    Ok(email.to_lowercase())
}

pub fn new_tenant(t: &NewTenant) -> Result<(), DomainError> {
    check_len("name", &t.name, 1, Some(NAME_MAX))?;
    check_len("domain", &t.domain, 1, Some(NAME_MAX))
}

pub fn tenant_patch(p: &TenantPatch) -> Result<(), DomainError> {
    check_opt_len("name", p.name.as_ref(), 1, Some(NAME_MAX))?;
    check_opt_len("domain", p.domain.as_ref(), 1, Some(NAME_MAX))
}

pub fn new_user(u: &NewUser) -> Result<(), DomainError> {
    check_len("name", &u.name, 1, Some(NAME_MAX))?;
    if u.password.chars().count() < PASSWORD_MIN {
        return Err(DomainError::validation(
            "password",
            format!("must be at least {PASSWORD_MIN} characters"),
        ));
    }
    Ok(())
}

pub fn user_patch(p: &UserPatch) -> Result<(), DomainError> {
    check_opt_len("name", p.name.as_ref(), 1, Some(NAME_MAX))
}

pub fn new_asset(a: &NewAsset) -> Result<(), DomainError> {
    check_len("type", &a.kind, 1, Some(TYPE_MAX))?;
    check_len("name", &a.name, 1, Some(NAME_MAX))
}

pub fn asset_patch(p: &AssetPatch) -> Result<(), DomainError> {
    check_opt_len("type", p.kind.as_ref(), 1, Some(TYPE_MAX))?;
    check_opt_len("name", p.name.as_ref(), 1, Some(NAME_MAX))
}

pub fn new_incident(i: &NewIncident) -> Result<(), DomainError> {
    check_len("title", &i.title, 1, Some(NAME_MAX))?;
    check_len("description", &i.description, 1, None)
}

pub fn incident_patch(p: &IncidentPatch) -> Result<(), DomainError> {
    check_opt_len("title", p.title.as_ref(), 1, Some(NAME_MAX))?;
    check_opt_len("description", p.description.as_ref(), 1, None)
}

pub fn new_alert(a: &NewAlert) -> Result<(), DomainError> {
    check_len("type", &a.kind, 1, Some(TYPE_MAX))?;
    check_len("title", &a.title, 1, Some(NAME_MAX))?;
    check_len("message", &a.message, 1, None)
}

pub fn alert_patch(p: &AlertPatch) -> Result<(), DomainError> {
    check_opt_len("type", p.kind.as_ref(), 1, Some(TYPE_MAX))?;
    check_opt_len("title", p.title.as_ref(), 1, Some(NAME_MAX))?;
    check_opt_len("message", p.message.as_ref(), 1, None)
}

pub fn new_recommendation(r: &NewRecommendation) -> Result<(), DomainError> {
    check_len("type", &r.kind, 1, Some(TYPE_MAX))?;
    check_len("title", &r.title, 1, Some(NAME_MAX))?;
    check_len("description", &r.description, 1, None)?;
    check_len("rationale", &r.rationale, 1, None)?;
    check_confidence(r.confidence)
}

pub fn recommendation_patch(p: &RecommendationPatch) -> Result<(), DomainError> {
    check_opt_len("type", p.kind.as_ref(), 1, Some(TYPE_MAX))?;
    check_opt_len("title", p.title.as_ref(), 1, Some(NAME_MAX))?;
    check_opt_len("description", p.description.as_ref(), 1, None)?;
    check_opt_len("rationale", p.rationale.as_ref(), 1, None)?;
    p.confidence.map_or(Ok(()), check_confidence)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn confidence_bounds_are_inclusive() {
        assert!(check_confidence(0.0).is_ok());
        assert!(check_confidence(1.0).is_ok());
        assert!(check_confidence(1.5).is_err());
        assert!(check_confidence(-0.1).is_err());
        assert!(check_confidence(f64::NAN).is_err());
    }

    #[test]
    fn length_counts_characters() {
        assert!(check_len("name", "", 1, Some(5)).is_err());
        assert!(check_len("name", "abcde", 1, Some(5)).is_ok());
        assert!(check_len("name", "abcdef", 1, Some(5)).is_err());
        assert!(check_len("description", &"x".repeat(10_000), 1, None).is_ok());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(
            normalize_email("  Ops@City.Example ").unwrap(),
            "ops@city.example"
        );
        for bad in ["", "nobody", "@city.example", "a@b", "a@@b.c", "a b@c.d", "a@.c"] {
            assert!(normalize_email(bad).is_err(), "{bad} accepted");
        }
    }
}

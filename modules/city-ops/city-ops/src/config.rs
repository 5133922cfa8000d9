//! Configuration for the city-ops module.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Listing and lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CityOpsConfig {
    /// Page size used when a list request has no `limit`.
    pub default_limit: u64,
    /// Largest accepted `limit`.
    pub max_limit: u64,
    /// Reject incident status changes outside the lifecycle table.
    pub enforce_transitions: bool,
    pub default_telemetry_limit: u64,
    pub max_telemetry_limit: u64,
}

impl Default for CityOpsConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: city_ops_sdk::page::DEFAULT_MAX_LIMIT,
            enforce_transitions: false,
            default_telemetry_limit: 100,
            max_telemetry_limit: 1000,
        }
    }
}

/// Placeholder signing key; only acceptable for throwaway in-memory runs.
pub const DEFAULT_SECRET_KEY: &str = "change-me-in-production";

/// Token issuing settings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuthConfig {
    /// HS256 signing key. Never serialized back out.
    #[serde(skip_serializing)]
    pub secret_key: SecretString,
    #[serde(with = "duration_serde")]
    pub access_token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: SecretString::from(DEFAULT_SECRET_KEY.to_owned()),
            access_token_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl AuthConfig {
    /// True while the signing key is still the built-in placeholder.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key.expose_secret() == DEFAULT_SECRET_KEY
    }
}

/// Human-readable durations (`"30s"`, `"15m"`) for config files.
pub mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    /// Fails when the serializer rejects a string.
    pub fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&humantime::format_duration(*d).to_string())
    }

    /// # Errors
    /// Fails when the value is not a humantime duration string.
    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CityOpsConfig::default();
        assert_eq!(cfg.default_limit, 20);
        assert_eq!(cfg.max_limit, 100);
        assert!(!cfg.enforce_transitions);
        assert_eq!(cfg.max_telemetry_limit, 1000);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: CityOpsConfig =
            serde_json::from_value(serde_json::json!({"enforce_transitions": true})).unwrap();
        assert!(cfg.enforce_transitions);
        assert_eq!(cfg.default_limit, 20);
    }

    #[test]
    fn unknown_fields_rejected() {
        let res: Result<CityOpsConfig, _> =
            serde_json::from_value(serde_json::json!({"page_size": 10}));
        assert!(res.is_err());
    }

    #[test]
    fn auth_ttl_is_humantime_and_secret_is_hidden() {
        let cfg: AuthConfig = serde_json::from_value(serde_json::json!({
            "secret_key": "s3cr3t",
            "access_token_ttl": "15m"
        }))
        .unwrap();
        assert_eq!(cfg.access_token_ttl, Duration::from_secs(900));
        assert_eq!(cfg.secret_key.expose_secret(), "s3cr3t");

        let out = serde_json::to_value(&cfg).unwrap();
        assert!(out.get("secret_key").is_none());
        assert_eq!(out["access_token_ttl"], "15m");
    }

    #[test]
    fn placeholder_secret_is_detected() {
        assert!(AuthConfig::default().uses_default_secret());
        let cfg = AuthConfig {
            secret_key: SecretString::from("rotated".to_owned()),
            ..AuthConfig::default()
        };
        assert!(!cfg.uses_default_secret());
    }
}

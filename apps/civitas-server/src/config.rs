//! Layered server configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional YAML
//! file, `CIVITAS__*` environment variables (`__` separates nesting levels),
//! then command-line overrides.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use city_ops::config::duration_serde;
use city_ops::{AuthConfig, CityOpsConfig};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CIVITAS__";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Exact origins, or `"*"` for any origin without credentials.
    pub allowed_origins: Vec<String>,
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_owned(),
                "http://localhost:8080".to_owned(),
            ],
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://civitas.db?mode=rwc".to_owned(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub city_ops: CityOpsConfig,
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Merges defaults, the YAML file (if any) and the environment.
    ///
    /// # Errors
    /// Fails on unreadable YAML, unknown keys or mistyped values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(path).extract().map_err(|e| Box::new(e).into())
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        if cli.mock {
            "sqlite::memory:".clone_into(&mut self.database.url);
        }
    }

    /// Cross-field checks serde cannot express.
    ///
    /// The placeholder signing key is only accepted in `mock` runs.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self, mock: bool) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_owned()));
        let ops = &self.city_ops;
        if ops.max_limit == 0 {
            return invalid("city_ops.max_limit must be at least 1");
        }
        if ops.default_limit == 0 || ops.default_limit > ops.max_limit {
            return invalid("city_ops.default_limit must be within 1..=max_limit");
        }
        if ops.default_telemetry_limit == 0
            || ops.default_telemetry_limit > ops.max_telemetry_limit
        {
            return invalid("city_ops.default_telemetry_limit must be within 1..=max_telemetry_limit");
        }
        if self.database.max_connections == 0 {
            return invalid("database.max_connections must be at least 1");
        }
        if self.server.request_timeout.is_zero() {
            return invalid("server.request_timeout must be positive");
        }
        if self.auth.secret_key.expose_secret().is_empty() {
            return invalid("auth.secret_key must not be empty");
        }
        if !mock && self.auth.uses_default_secret() {
            return invalid(
                "auth.secret_key is the built-in placeholder; set CIVITAS__AUTH__SECRET_KEY or use --mock",
            );
        }
        if self.auth.access_token_ttl.is_zero() {
            return invalid("auth.access_token_ttl must be positive");
        }
        Ok(())
    }

    /// # Errors
    /// Fails when `server.host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self.server.host.parse().map_err(|e| {
            ConfigError::Invalid(format!("server.host '{}': {e}", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Effective configuration as pretty JSON. The signing key is omitted.
    ///
    /// # Errors
    /// Fails only if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    fn load_in(jail: &Jail, yaml: Option<&str>) -> Result<AppConfig, ConfigError> {
        let path = yaml.map(|contents| {
            jail.create_file("civitas.yaml", contents).unwrap();
            jail.directory().join("civitas.yaml")
        });
        AppConfig::load(path.as_deref())
    }

    #[test]
    fn defaults_are_valid() {
        Jail::expect_with(|jail| {
            let cfg = load_in(jail, None).unwrap();
            assert_eq!(cfg.server.port, 8000);
            assert_eq!(cfg.city_ops.default_limit, 20);
            assert_eq!(cfg.auth.access_token_ttl, Duration::from_secs(30 * 60));
            cfg.validate(true).unwrap();
            Ok(())
        });
    }

    #[test]
    fn placeholder_secret_needs_mock() {
        Jail::expect_with(|jail| {
            let cfg = load_in(jail, None).unwrap();
            assert!(cfg.auth.uses_default_secret());
            let err = cfg.validate(false).unwrap_err();
            assert!(err.to_string().contains("auth.secret_key"), "{err}");
            cfg.validate(true).unwrap();
            Ok(())
        });
    }

    #[test]
    fn configured_secret_passes_without_mock() {
        Jail::expect_with(|jail| {
            let cfg = load_in(jail, Some("auth:\n  secret_key: from-yaml\n")).unwrap();
            cfg.validate(false).unwrap();

            jail.set_env("CIVITAS__AUTH__SECRET_KEY", "from-env-secret");
            let cfg = load_in(jail, None).unwrap();
            cfg.validate(false).unwrap();
            Ok(())
        });
    }

    #[test]
    fn yaml_then_env_then_cli() {
        Jail::expect_with(|jail| {
            jail.set_env("CIVITAS__SERVER__PORT", "9100");
            jail.set_env("CIVITAS__CITY_OPS__ENFORCE_TRANSITIONS", "true");
            let mut cfg = load_in(
                jail,
                Some(
                    "server:\n  port: 9000\n  request_timeout: 5s\n\
                     logging:\n  format: json\n",
                ),
            )
            .unwrap();
            assert_eq!(cfg.server.port, 9100);
            assert_eq!(cfg.server.request_timeout, Duration::from_secs(5));
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert!(cfg.city_ops.enforce_transitions);

            cfg.apply_cli_overrides(CliOverrides {
                port: Some(9200),
                verbose: 2,
                mock: true,
            });
            assert_eq!(cfg.server.port, 9200);
            assert_eq!(cfg.logging.level, "debug");
            assert_eq!(cfg.database.url, "sqlite::memory:");
            Ok(())
        });
    }

    #[test]
    fn secret_comes_from_env_and_is_not_printed() {
        Jail::expect_with(|jail| {
            jail.set_env("CIVITAS__AUTH__SECRET_KEY", "from-env-secret");
            let cfg = load_in(jail, None).unwrap();
            assert_eq!(cfg.auth.secret_key.expose_secret(), "from-env-secret");
            assert!(!cfg.to_pretty_json().unwrap().contains("from-env-secret"));
            Ok(())
        });
    }

    #[test]
    fn unknown_key_is_rejected() {
        Jail::expect_with(|jail| {
            let res = load_in(jail, Some("server:\n  prot: 1\n"));
            assert!(matches!(res, Err(ConfigError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn default_limit_above_max_is_invalid() {
        let mut cfg = AppConfig::default();
        cfg.city_ops.default_limit = 500;
        assert!(matches!(cfg.validate(true), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bind_addr_requires_ip() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.bind_addr().unwrap().port(), 8000);
        cfg.server.host = "localhost".to_owned();
        assert!(cfg.bind_addr().is_err());
    }
}

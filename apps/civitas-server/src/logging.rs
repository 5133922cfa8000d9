use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Installs the global subscriber writing to stdout.
///
/// `RUST_LOG` takes precedence over `logging.level`.
///
/// # Errors
/// Fails on a malformed level directive or when a subscriber is already set.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.level)?,
    };
    let registry = tracing_subscriber::registry().with(env_filter);

    match cfg.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_target(true)
                    .with_ansi(false),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true))
            .try_init()?,
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn configured_levels_are_valid_filters() {
        for level in ["error", "warn", "info", "debug", "trace", "city_ops=debug,info"] {
            assert!(EnvFilter::try_new(level).is_ok(), "{level} should parse");
        }
    }
}

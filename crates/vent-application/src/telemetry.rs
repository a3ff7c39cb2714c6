//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};
use vent_core::config::LoggingConfig;

/// Installs a global fmt subscriber filtered by `RUST_LOG`, or by
/// `config.level` when the variable is unset.
///
/// Returns `false` if a global subscriber was already installed; that is not
/// an error, so callers may initialise more than once.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log filter '{}'", config.level))?,
    };

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(level = %config.level, "Tracing initialised");
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        let config = LoggingConfig::default();
        init_tracing(&config).unwrap();
        assert!(!init_tracing(&config).unwrap());
    }
}

// ── Tracing setup ──
//
// Installs a global fmt subscriber. `RUST_LOG` wins over the configured
// level when set.

use tracing_subscriber::EnvFilter;

use crate::{Config, ConfigError, LogFormat};

/// Build the filter for `config`, preferring `RUST_LOG` when present.
pub fn env_filter(config: &Config) -> Result<EnvFilter, ConfigError> {
    let level = config.level_filter()?;
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &Config) -> Result<(), ConfigError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ConfigError::Logging(e.to_string()))
}

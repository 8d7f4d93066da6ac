//! Configuration for hosts embedding the Teamized cache.
//!
//! Loads a TOML file from the platform config directory, layers
//! `TEAMIZED_` environment overrides on top, and translates the result
//! into `teamized_core::CacheConfig`. The [`logging`] module installs the
//! tracing subscriber described by the same file.

pub mod logging;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

use teamized_core::CacheConfig;

pub use logging::init_tracing;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install tracing subscriber: {0}")]
    Logging(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<ConfigError> for teamized_core::CoreError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default tracing level, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub cache: CacheSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            cache: CacheSection::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// The `[cache]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheSection {
    /// Reload the team list after the last cached team is removed.
    #[serde(default = "default_refetch_when_empty")]
    pub refetch_when_empty: bool,

    /// Age in seconds after which a fetched category counts as stale.
    /// Unset means fetched categories never go stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_after_secs: Option<u64>,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            refetch_when_empty: default_refetch_when_empty(),
            stale_after_secs: None,
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
fn default_refetch_when_empty() -> bool {
    true
}

impl Config {
    /// Parsed form of `log_level`.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "log_level".into(),
                reason: format!(
                    "expected one of off, error, warn, info, debug, trace, got '{}'",
                    self.log_level
                ),
            })
    }

    /// Translate the `[cache]` table into the core's runtime config.
    pub fn to_cache_config(&self) -> Result<CacheConfig, ConfigError> {
        let stale_after = match self.cache.stale_after_secs {
            Some(0) => {
                return Err(ConfigError::Validation {
                    field: "cache.stale_after_secs".into(),
                    reason: "must be greater than zero".into(),
                });
            }
            secs => secs.map(Duration::from_secs),
        };

        Ok(CacheConfig {
            refetch_when_empty: self.cache.refetch_when_empty,
            stale_after,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("app", "teamized", "teamized").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("teamized");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file yields the
/// defaults. Nested keys use a double underscore in env names, e.g.
/// `TEAMIZED_CACHE__STALE_AFTER_SECS`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TEAMIZED_").split("__"));

    let config: Config = figment.extract()?;
    config.level_filter()?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_translate_to_core_defaults() {
        let cache = Config::default().to_cache_config().unwrap();
        assert_eq!(cache, CacheConfig::default());
    }

    #[test]
    fn zero_staleness_is_rejected() {
        let mut config = Config::default();
        config.cache.stale_after_secs = Some(0);
        let err = config.to_cache_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "cache.stale_after_secs"));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let config = Config {
            log_level: "chatty".into(),
            ..Config::default()
        };
        assert!(config.level_filter().is_err());
    }

    #[test]
    fn config_errors_surface_as_core_config_errors() {
        let err: teamized_core::CoreError = ConfigError::Logging("already set".into()).into();
        assert!(matches!(err, teamized_core::CoreError::Config { .. }));
    }
}

//! # Runtime Configuration
//!
//! Everything the binary needs, read from `TV_*` environment variables.
//! Unset variables fall back to defaults; set but malformed ones are errors.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tv_01_disclosure::DisclosureConfig;
use vault_telemetry::TelemetryConfig;

/// Default upkeep interval.
pub const DEFAULT_UPKEEP_INTERVAL_SECS: u64 = 15;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// The upkeep interval must be positive.
    #[error("TV_UPKEEP_INTERVAL_SECS must be greater than zero")]
    ZeroInterval,
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Time between upkeep cycles.
    pub upkeep_interval: Duration,
    /// Engine configuration.
    pub disclosure: DisclosureConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// Optional JSON file of submissions to load at startup.
    pub seed_file: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            upkeep_interval: Duration::from_secs(DEFAULT_UPKEEP_INTERVAL_SECS),
            disclosure: DisclosureConfig::default(),
            telemetry: TelemetryConfig::default(),
            seed_file: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `TV_UPKEEP_INTERVAL_SECS`: seconds between upkeep cycles (default: 15)
    /// - `TV_PRE_RELEASE_WINDOW_SECS`: pre-release window (default: 43200)
    /// - `TV_MAX_UPKEEP_BATCH`: proposals per cycle (default: 256)
    /// - `TV_VERIFY_ON_ADD`: check content hash on submission (default: true, forced on while disclosure is verified)
    /// - `TV_VERIFY_ON_DISCLOSURE`: check content hash on every pull (default: true)
    /// - `TV_SEED_FILE`: JSON array of submissions to load at startup
    ///
    /// Logging variables are read by [`TelemetryConfig::for_component`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|var| std::env::var(var).ok())?;
        config.telemetry = TelemetryConfig::for_component("runtime");
        Ok(config)
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Telemetry settings are left at their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_var::<u64, _>(&lookup, "TV_UPKEEP_INTERVAL_SECS")? {
            if secs == 0 {
                return Err(ConfigError::ZeroInterval);
            }
            config.upkeep_interval = Duration::from_secs(secs);
        }
        if let Some(window) = parse_var::<u64, _>(&lookup, "TV_PRE_RELEASE_WINDOW_SECS")? {
            config.disclosure = config.disclosure.with_window(window);
        }
        if let Some(batch) = parse_var::<usize, _>(&lookup, "TV_MAX_UPKEEP_BATCH")? {
            config.disclosure = config.disclosure.with_max_batch(batch);
        }
        if let Some(flag) = parse_flag(&lookup, "TV_VERIFY_ON_ADD")? {
            config.disclosure.verify_on_add = flag;
        }
        if let Some(flag) = parse_flag(&lookup, "TV_VERIFY_ON_DISCLOSURE")? {
            config.disclosure.verify_on_disclosure = flag;
        }
        config.seed_file = lookup("TV_SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&'static str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_flag<F>(lookup: &F, var: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue {
            var,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

//! # Vault Telemetry
//!
//! Structured logging and metrics rendering for Timelock-Vault processes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vault_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TV_SERVICE_NAME` | `timelock-vault` | Service name attached to the startup log |
//! | `TV_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `TV_JSON_LOGS` | `false` (true in containers) | JSON formatted logs |
//! | `TV_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::render_metrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed
    #[error("Logging already initialized")]
    AlreadyInitialized,

    /// The log filter could not be parsed
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter {
        /// Filter string as configured
        filter: String,
        /// Parser message
        reason: String,
    },

    /// Metrics could not be encoded
    #[error("Failed to encode metrics: {0}")]
    MetricsEncode(String),
}

/// Helper to create structured log entries tagged with the component name.
#[macro_export]
macro_rules! log_event {
    // Info level with component
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    // Warn level with component
    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    // Error level with component
    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    // Debug level with component
    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an entry-related event with standard fields.
#[macro_export]
macro_rules! log_entry_event {
    ($level:ident, $component:expr, $msg:expr, $entry_id:expr, $owner:expr, $data_name:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            id = $entry_id,
            owner = %$owner,
            data_name = %$data_name,
            $($($field)*,)?
            $msg
        )
    };
}

//! Prometheus text rendering.
//!
//! Subsystems register their own metrics in the default registry (see the
//! `metrics` feature of `tv-01-disclosure`); this module only encodes them.

use crate::TelemetryError;
use prometheus::{Encoder, TextEncoder};

/// Encode every metric in the default registry in text exposition format.
pub fn render_metrics() -> Result<String, TelemetryError> {
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}

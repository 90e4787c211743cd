//! # Disclosure Metrics
//!
//! Prometheus metrics for the disclosure engine.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! tv-01-disclosure = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `disclosure_entries_added_total` - Counter of accepted submissions
//! - `disclosure_entries_rejected_total` - Counter of rejected submissions (by reason)
//! - `disclosure_release_requests_total` - Counter of `Pending → ReleaseRequested` transitions
//! - `disclosure_releases_total` - Counter of `ReleaseRequested → Released` transitions
//! - `disclosure_stale_proposals_total` - Counter of skipped upkeep proposals
//! - `disclosure_disclosures_total` - Counter of gate pulls served (by kind)
//! - `disclosure_disclosures_refused_total` - Counter of gate pulls refused (by reason)
//! - `disclosure_entries_stored` - Gauge of entries currently stored

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total submissions accepted
    pub static ref ENTRIES_ADDED: IntCounter = register_int_counter!(
        "disclosure_entries_added_total",
        "Total number of submissions accepted"
    )
    .expect("Failed to create ENTRIES_ADDED metric");

    /// Total submissions rejected, labeled by reason
    pub static ref ENTRIES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "disclosure_entries_rejected_total",
        "Total number of submissions rejected",
        &["reason"]
    )
    .expect("Failed to create ENTRIES_REJECTED metric");

    /// Total release requests applied
    pub static ref RELEASE_REQUESTS: IntCounter = register_int_counter!(
        "disclosure_release_requests_total",
        "Total number of entries moved to ReleaseRequested"
    )
    .expect("Failed to create RELEASE_REQUESTS metric");

    /// Total releases applied
    pub static ref RELEASES: IntCounter = register_int_counter!(
        "disclosure_releases_total",
        "Total number of entries moved to Released"
    )
    .expect("Failed to create RELEASES metric");

    /// Total stale upkeep proposals skipped
    pub static ref STALE_PROPOSALS: IntCounter = register_int_counter!(
        "disclosure_stale_proposals_total",
        "Total number of upkeep proposals skipped as stale"
    )
    .expect("Failed to create STALE_PROPOSALS metric");

    /// Gate pulls served, labeled by kind
    pub static ref DISCLOSURES: IntCounterVec = register_int_counter_vec!(
        "disclosure_disclosures_total",
        "Total number of payloads and keys disclosed",
        &["kind"]
    )
    .expect("Failed to create DISCLOSURES metric");

    /// Gate pulls refused, labeled by reason
    pub static ref DISCLOSURES_REFUSED: IntCounterVec = register_int_counter_vec!(
        "disclosure_disclosures_refused_total",
        "Total number of disclosure requests refused",
        &["reason"]
    )
    .expect("Failed to create DISCLOSURES_REFUSED metric");

    /// Entries currently stored
    pub static ref ENTRIES_STORED: IntGauge = register_int_gauge!(
        "disclosure_entries_stored",
        "Number of entries currently stored"
    )
    .expect("Failed to create ENTRIES_STORED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an accepted submission
#[cfg(feature = "metrics")]
pub fn record_entry_added() {
    ENTRIES_ADDED.inc();
}

/// Record a rejected submission with reason
#[cfg(feature = "metrics")]
pub fn record_entry_rejected(reason: &str) {
    ENTRIES_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_release_requested() {
    RELEASE_REQUESTS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_released() {
    RELEASES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_stale_proposals(count: u64) {
    STALE_PROPOSALS.inc_by(count);
}

/// Record a served gate pull
#[cfg(feature = "metrics")]
pub fn record_disclosure(kind: &str) {
    DISCLOSURES.with_label_values(&[kind]).inc();
}

/// Record a refused gate pull with reason
#[cfg(feature = "metrics")]
pub fn record_disclosure_refused(reason: &str) {
    DISCLOSURES_REFUSED.with_label_values(&[reason]).inc();
}

/// Update stored entries gauge
#[cfg(feature = "metrics")]
pub fn set_entries_stored(count: usize) {
    ENTRIES_STORED.set(count as i64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_entry_added() {}

#[cfg(not(feature = "metrics"))]
pub fn record_entry_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_release_requested() {}

#[cfg(not(feature = "metrics"))]
pub fn record_released() {}

#[cfg(not(feature = "metrics"))]
pub fn record_stale_proposals(_count: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_disclosure(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_disclosure_refused(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_entries_stored(_count: usize) {}

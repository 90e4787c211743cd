//! Error types for the disclosure engine.

use shared_crypto::CryptoError;
use shared_types::{EntryId, Hash, Timestamp};
use std::fmt;
use thiserror::Error;

/// Reasons `add_entry` rejects a submission, checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Owner is empty
    #[error("Owner is required")]
    OwnerRequired,

    /// Data name is empty
    #[error("Data name is required")]
    DataNameRequired,

    /// Encrypted payload is empty
    #[error("Encrypted payload is required")]
    PayloadRequired,

    /// Decryption key is empty
    #[error("Decryption key is required")]
    KeyRequired,

    /// Release time is not strictly after the current time
    #[error("Release time must be in the future: {release_time} <= now {now}")]
    ReleaseTimeInPast { release_time: Timestamp, now: Timestamp },
}

impl ValidationError {
    /// Stable label, used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OwnerRequired => "owner_required",
            Self::DataNameRequired => "data_name_required",
            Self::PayloadRequired => "payload_required",
            Self::KeyRequired => "key_required",
            Self::ReleaseTimeInPast { .. } => "release_time_in_past",
        }
    }
}

/// How a missing entry was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLookup {
    /// By insertion id.
    Id(EntryId),
    /// By `(data_name, owner)` pair.
    Name { data_name: String, owner: String },
}

impl fmt::Display for EntryLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name { data_name, owner } => write!(f, "{data_name:?} owned by {owner:?}"),
        }
    }
}

/// Disclosure engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisclosureError {
    /// Submission failed validation; nothing was stored
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Release time has not been reached yet
    #[error("Entry {id} not releasable before {release_time} (now {now})")]
    NotYetReleasable {
        id: EntryId,
        release_time: Timestamp,
        now: Timestamp,
    },

    /// No entry matches the lookup
    #[error("Entry not found: {0}")]
    NotFound(EntryLookup),

    /// Stored payload no longer digests to the recorded hash
    #[error("Integrity mismatch for entry {id}: expected {}, computed {}", hex::encode(.expected), hex::encode(.actual))]
    IntegrityMismatch {
        id: EntryId,
        expected: Hash,
        actual: Hash,
    },
}

impl DisclosureError {
    /// Attaches the entry id to a failed integrity check.
    pub(crate) fn integrity(id: EntryId, err: CryptoError) -> Self {
        match err {
            CryptoError::IntegrityMismatch { expected, actual } => {
                Self::IntegrityMismatch { id, expected, actual }
            }
        }
    }

    /// Stable label, used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(inner) => inner.label(),
            Self::NotYetReleasable { .. } => "not_yet_releasable",
            Self::NotFound(_) => "not_found",
            Self::IntegrityMismatch { .. } => "integrity_mismatch",
        }
    }
}

/// Result type for disclosure operations
pub type DisclosureResult<T> = Result<T, DisclosureError>;

//! # Core Entities
//!
//! Identifiers, digests and the lifecycle phase of a disclosure entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte content digest (Keccak-256).
pub type Hash = [u8; 32];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Identifier assigned to an entry at insertion, dense and never reused.
pub type EntryId = u64;

/// Lifecycle stage of a disclosure entry.
///
/// Phases are ordered and only ever advance:
///
/// ```text
/// [Pending] ──request──→ [ReleaseRequested] ──finalize──→ [Released]
/// ```
///
/// On the wire a phase is its numeric code (see [`Phase::as_u8`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    /// Stored, nothing announced yet.
    Pending,
    /// Inside the pre-release window; key release has been announced.
    ReleaseRequested,
    /// Release time passed and the release was finalized.
    Released,
}

impl Phase {
    /// Numeric code of the phase (0, 1, 2).
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::ReleaseRequested => 1,
            Self::Released => 2,
        }
    }

    /// The phase that follows this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::ReleaseRequested),
            Self::ReleaseRequested => Some(Self::Released),
            Self::Released => None,
        }
    }

    /// Whether the entry has reached its terminal phase.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Released
    }
}

/// A numeric phase code outside 0..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPhase(pub u8);

impl fmt::Display for InvalidPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid phase code {}", self.0)
    }
}

impl std::error::Error for InvalidPhase {}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> Self {
        phase.as_u8()
    }
}

impl TryFrom<u8> for Phase {
    type Error = InvalidPhase;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Pending),
            1 => Ok(Self::ReleaseRequested),
            2 => Ok(Self::Released),
            other => Err(InvalidPhase(other)),
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::ReleaseRequested => "release_requested",
            Self::Released => "released",
        };
        f.write_str(name)
    }
}

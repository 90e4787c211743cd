//! Driving Ports (API - Inbound)

use crate::domain::{Entry, NewEntry, PublicView, UpkeepAction, UpkeepCheck, UpkeepReport};
use crate::error::DisclosureResult;
use shared_types::{EntryId, Phase, Timestamp};

/// Primary disclosure API.
///
/// Submitters call `add_entry`, the upkeep driver calls `check_due` and
/// `apply`, and recipients pull through `send_payload` and
/// `send_decryption_key`. Every mutating call is serialized by the
/// implementation; read calls may run concurrently.
pub trait DisclosureApi: Send + Sync {
    /// Validates and stores a submission, returning its id.
    fn add_entry(&self, submission: NewEntry) -> DisclosureResult<EntryId>;

    /// Snapshot of every stored entry in id order, keys included.
    ///
    /// Trusted callers only.
    fn list_all(&self) -> Vec<Entry>;

    /// Public view of the first entry matching `(data_name, owner)`.
    fn get_public_view(&self, data_name: &str, owner: &str) -> DisclosureResult<PublicView>;

    /// Snapshot of a single entry.
    fn get_entry(&self, id: EntryId) -> DisclosureResult<Entry>;

    /// Current phase of an entry.
    fn phase_of(&self, id: EntryId) -> DisclosureResult<Phase>;

    /// Pure check: which transitions are due at `current_time`.
    fn check_due(&self, current_time: Timestamp) -> UpkeepCheck;

    /// `check_due` returning at most `limit` proposals. The configured batch
    /// cap still applies.
    fn check_due_bounded(&self, current_time: Timestamp, limit: usize) -> UpkeepCheck;

    /// Applies proposals against the current time, skipping stale ones.
    fn apply(&self, proposals: &[UpkeepAction]) -> UpkeepReport;

    /// `check_due` at the current time followed by `apply`.
    fn run_upkeep(&self) -> UpkeepReport;

    /// Returns the encrypted payload once its release time has passed.
    fn send_payload(&self, id: EntryId) -> DisclosureResult<Vec<u8>>;

    /// Returns the decryption key once its release time has passed.
    fn send_decryption_key(&self, id: EntryId) -> DisclosureResult<Vec<u8>>;

    /// Removes every entry. Ids are not reused afterwards.
    fn clear(&self);

    /// Number of stored entries.
    fn entry_count(&self) -> usize;
}

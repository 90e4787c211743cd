//! # Entry Store
//!
//! Exclusive owner of the ordered entry sequence.
//!
//! ## Data Structures
//!
//! - `entries`: dense `Vec` in id order; id `n` lives at `n - base_id`
//! - `release_index`: `(release_time, id)` for every entry not yet released,
//!   so upkeep only visits entries whose horizon has passed
//!
//! ## Invariants
//!
//! - Ids are dense, increasing and never reused, even across [`EntryStore::clear`]
//! - An insert either appends a complete record or leaves the store untouched
//! - Phase only moves forward, one step at a time

use super::entry::{Entry, NewEntry, PublicView};
use crate::error::{DisclosureError, DisclosureResult, EntryLookup, ValidationError};
use shared_crypto::IntegrityValidator;
use shared_types::{EntryId, Phase, Timestamp};
use std::collections::BTreeSet;
use tracing::debug;

/// Ordered collection of disclosure entries.
#[derive(Debug, Default)]
pub struct EntryStore {
    /// Entries in id order.
    entries: Vec<Entry>,
    /// Id of `entries[0]`; raised by `clear`.
    base_id: EntryId,
    /// Id handed to the next insert.
    next_id: EntryId,
    /// Unreleased entries ordered by release time.
    release_index: BTreeSet<(Timestamp, EntryId)>,
}

impl EntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id the next accepted submission will receive.
    pub fn next_id(&self) -> EntryId {
        self.next_id
    }

    /// Validates and appends a submission.
    ///
    /// Checks run in a fixed order: owner, data name, payload, key, release
    /// time, then (when a validator is given) the content hash.
    pub fn insert(
        &mut self,
        new: NewEntry,
        now: Timestamp,
        integrity: Option<&IntegrityValidator>,
    ) -> DisclosureResult<EntryId> {
        Self::validate(&new, now)?;

        if let Some(validator) = integrity {
            validator
                .ensure(&new.encrypted_payload, &new.content_hash)
                .map_err(|e| DisclosureError::integrity(self.next_id, e))?;
        }

        let id = self.next_id;
        self.release_index.insert((new.release_time, id));
        self.entries.push(Entry::from_submission(id, new));
        self.next_id += 1;
        Ok(id)
    }

    fn validate(new: &NewEntry, now: Timestamp) -> Result<(), ValidationError> {
        if new.owner.is_empty() {
            return Err(ValidationError::OwnerRequired);
        }
        if new.data_name.is_empty() {
            return Err(ValidationError::DataNameRequired);
        }
        if new.encrypted_payload.is_empty() {
            return Err(ValidationError::PayloadRequired);
        }
        if new.decryption_key.is_empty() {
            return Err(ValidationError::KeyRequired);
        }
        if new.release_time <= now {
            return Err(ValidationError::ReleaseTimeInPast {
                release_time: new.release_time,
                now,
            });
        }
        Ok(())
    }

    /// All entries in id order, including payloads and keys.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Gets an entry by id.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        let offset = id.checked_sub(self.base_id)?;
        self.entries.get(usize::try_from(offset).ok()?)
    }

    /// Gets an entry by id or fails with `NotFound`.
    pub fn require(&self, id: EntryId) -> DisclosureResult<&Entry> {
        self.get(id)
            .ok_or(DisclosureError::NotFound(EntryLookup::Id(id)))
    }

    /// First entry, in id order, with this `(data_name, owner)` pair.
    pub fn find_by_name(&self, data_name: &str, owner: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.data_name == data_name && e.owner == owner)
    }

    /// Public projection of the first matching entry.
    pub fn public_view(&self, data_name: &str, owner: &str) -> DisclosureResult<PublicView> {
        self.find_by_name(data_name, owner)
            .map(Entry::public_view)
            .ok_or_else(|| {
                DisclosureError::NotFound(EntryLookup::Name {
                    data_name: data_name.to_string(),
                    owner: owner.to_string(),
                })
            })
    }

    /// Unreleased entries with `release_time <= horizon`, in release-time order.
    pub(crate) fn unreleased_until(&self, horizon: Timestamp) -> impl Iterator<Item = &Entry> + '_ {
        self.release_index
            .range(..=(horizon, EntryId::MAX))
            .filter_map(move |(_, id)| self.get(*id))
    }

    /// Moves an entry from `from` to the next phase.
    ///
    /// Returns `false` without touching anything when the entry is missing or
    /// no longer in `from`.
    pub(crate) fn advance_phase(&mut self, id: EntryId, from: Phase) -> bool {
        let Some(to) = from.next() else {
            return false;
        };
        let Some(offset) = id
            .checked_sub(self.base_id)
            .and_then(|o| usize::try_from(o).ok())
        else {
            return false;
        };
        let Some(entry) = self.entries.get_mut(offset) else {
            return false;
        };
        if entry.phase != from {
            return false;
        }

        entry.phase = to;
        if to.is_terminal() {
            self.release_index.remove(&(entry.release_time, id));
        }
        true
    }

    /// Removes every entry. The id counter keeps climbing.
    pub fn clear(&mut self) {
        debug!(
            removed = self.entries.len(),
            next_id = self.next_id,
            "Entry store cleared"
        );
        self.entries.clear();
        self.release_index.clear();
        self.base_id = self.next_id;
    }
}

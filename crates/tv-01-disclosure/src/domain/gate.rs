//! # Disclosure Gate
//!
//! Time-gated pull path for payloads and keys.
//!
//! The gate only compares `now` against `release_time`; it does not look at
//! the upkeep phase. Both pulls are repeatable and never change the store.

use super::store::EntryStore;
use crate::error::{DisclosureError, DisclosureResult};
use shared_bus::DisclosureEvent;
use shared_crypto::IntegrityValidator;
use shared_types::{EntryId, Timestamp};
use std::fmt;
use tracing::warn;

/// Which half of an entry is being disclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisclosureKind {
    Payload,
    Key,
}

impl DisclosureKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Payload => "payload",
            Self::Key => "key",
        }
    }
}

impl fmt::Display for DisclosureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bytes handed out by the gate, with the event announcing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    pub bytes: Vec<u8>,
    pub event: DisclosureEvent,
}

/// Releases payloads and keys once their release time has passed.
#[derive(Debug, Clone, Default)]
pub struct DisclosureGate {
    integrity: Option<IntegrityValidator>,
}

impl DisclosureGate {
    /// Gate that re-digests the stored payload before every pull when
    /// `verify_integrity` is set.
    pub fn new(verify_integrity: bool) -> Self {
        Self {
            integrity: verify_integrity.then(IntegrityValidator::new),
        }
    }

    pub fn verifies_integrity(&self) -> bool {
        self.integrity.is_some()
    }

    pub fn release_payload(
        &self,
        store: &EntryStore,
        id: EntryId,
        now: Timestamp,
    ) -> DisclosureResult<Disclosure> {
        self.release(store, id, DisclosureKind::Payload, now)
    }

    pub fn release_key(
        &self,
        store: &EntryStore,
        id: EntryId,
        now: Timestamp,
    ) -> DisclosureResult<Disclosure> {
        self.release(store, id, DisclosureKind::Key, now)
    }

    /// Checks existence, then time, then integrity, and builds the disclosure.
    pub fn release(
        &self,
        store: &EntryStore,
        id: EntryId,
        kind: DisclosureKind,
        now: Timestamp,
    ) -> DisclosureResult<Disclosure> {
        let entry = store.require(id)?;

        if !entry.is_releasable_at(now) {
            return Err(DisclosureError::NotYetReleasable {
                id,
                release_time: entry.release_time(),
                now,
            });
        }

        if let Some(validator) = &self.integrity {
            validator
                .ensure(entry.encrypted_payload(), entry.content_hash())
                .map_err(|e| {
                    warn!(id, kind = %kind, "Stored payload failed integrity check");
                    DisclosureError::integrity(id, e)
                })?;
        }

        let owner = entry.owner().to_string();
        let data_name = entry.data_name().to_string();
        let hash = *entry.content_hash();

        let (bytes, event) = match kind {
            DisclosureKind::Payload => {
                let payload = entry.encrypted_payload().to_vec();
                let event = DisclosureEvent::PushEncryptedData {
                    payload: payload.clone(),
                    owner,
                    data_name,
                    hash,
                };
                (payload, event)
            }
            DisclosureKind::Key => {
                let key = entry.decryption_key().to_vec();
                let event = DisclosureEvent::PushPrivateKey {
                    key: key.clone(),
                    owner,
                    data_name,
                    hash,
                };
                (key, event)
            }
        };

        Ok(Disclosure { bytes, event })
    }
}

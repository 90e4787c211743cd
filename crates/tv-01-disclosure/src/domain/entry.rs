//! Disclosure entries and their projections.

use serde::{Deserialize, Serialize};
use shared_types::{EntryId, Hash, Phase, Timestamp};
use std::fmt;

/// A submission, before validation and id assignment.
///
/// Deserialises from the JSON shape used by submitting clients:
/// `{"encryptedData", "decryptionKey", "owner", "dataName", "releaseTime", "hash"}`
/// with byte fields hex encoded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    #[serde(rename = "encryptedData", with = "hex::serde")]
    pub encrypted_payload: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub decryption_key: Vec<u8>,
    pub owner: String,
    pub data_name: String,
    pub release_time: Timestamp,
    #[serde(rename = "hash", with = "hex::serde")]
    pub content_hash: Hash,
}

impl NewEntry {
    pub fn new(
        encrypted_payload: impl Into<Vec<u8>>,
        decryption_key: impl Into<Vec<u8>>,
        owner: impl Into<String>,
        data_name: impl Into<String>,
        release_time: Timestamp,
        content_hash: Hash,
    ) -> Self {
        Self {
            encrypted_payload: encrypted_payload.into(),
            decryption_key: decryption_key.into(),
            owner: owner.into(),
            data_name: data_name.into(),
            release_time,
            content_hash,
        }
    }
}

impl fmt::Debug for NewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEntry")
            .field("payload_len", &self.encrypted_payload.len())
            .field("key_len", &self.decryption_key.len())
            .field("owner", &self.owner)
            .field("data_name", &self.data_name)
            .field("release_time", &self.release_time)
            .field("content_hash", &hex::encode(self.content_hash))
            .finish()
    }
}

/// One stored disclosure record.
///
/// Fields are read-only outside the crate; the phase only moves forward and
/// only through upkeep.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub(crate) id: EntryId,
    #[serde(rename = "encryptedData", with = "hex::serde")]
    pub(crate) encrypted_payload: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub(crate) decryption_key: Vec<u8>,
    pub(crate) owner: String,
    pub(crate) data_name: String,
    pub(crate) release_time: Timestamp,
    #[serde(rename = "hash", with = "hex::serde")]
    pub(crate) content_hash: Hash,
    pub(crate) phase: Phase,
}

impl Entry {
    pub(crate) fn from_submission(id: EntryId, new: NewEntry) -> Self {
        Self {
            id,
            encrypted_payload: new.encrypted_payload,
            decryption_key: new.decryption_key,
            owner: new.owner,
            data_name: new.data_name,
            release_time: new.release_time,
            content_hash: new.content_hash,
            phase: Phase::Pending,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn encrypted_payload(&self) -> &[u8] {
        &self.encrypted_payload
    }

    pub fn decryption_key(&self) -> &[u8] {
        &self.decryption_key
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn data_name(&self) -> &str {
        &self.data_name
    }

    pub fn release_time(&self) -> Timestamp {
        self.release_time
    }

    pub fn content_hash(&self) -> &Hash {
        &self.content_hash
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the gate may hand out this entry's payload and key at `now`.
    pub fn is_releasable_at(&self, now: Timestamp) -> bool {
        now >= self.release_time
    }

    /// Redacted projection: everything except the decryption key.
    pub fn public_view(&self) -> PublicView {
        PublicView {
            encrypted_payload: self.encrypted_payload.clone(),
            content_hash: self.content_hash,
            owner: self.owner.clone(),
            data_name: self.data_name.clone(),
            release_time: self.release_time,
            phase: self.phase,
            key_released: self.phase == Phase::Released,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("payload_len", &self.encrypted_payload.len())
            .field("key", &format_args!("<{} bytes redacted>", self.decryption_key.len()))
            .field("owner", &self.owner)
            .field("data_name", &self.data_name)
            .field("release_time", &self.release_time)
            .field("content_hash", &hex::encode(self.content_hash))
            .field("phase", &self.phase)
            .finish()
    }
}

/// Public projection of an entry. Never carries the decryption key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicView {
    #[serde(rename = "encryptedData", with = "hex::serde")]
    pub encrypted_payload: Vec<u8>,
    #[serde(rename = "hash", with = "hex::serde")]
    pub content_hash: Hash,
    pub owner: String,
    pub data_name: String,
    pub release_time: Timestamp,
    pub phase: Phase,
    pub key_released: bool,
}

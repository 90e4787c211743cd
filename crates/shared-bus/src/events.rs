//! # Disclosure Events
//!
//! Notifications emitted by the upkeep state machine and the disclosure
//! gate. Serialised with a `type` tag and camelCase fields so a relay can
//! forward them to browser clients unchanged.

use serde::{Deserialize, Serialize};
use shared_types::{EntryId, Hash};

/// All events that can be published by the disclosure engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DisclosureEvent {
    // =========================================================================
    // UPKEEP (phase-gated notifications)
    // =========================================================================
    /// An entry entered its pre-release window.
    KeyReleaseRequested {
        id: EntryId,
        owner: String,
        data_name: String,
    },

    /// An entry passed its release time and was finalized.
    KeyReleased {
        id: EntryId,
        owner: String,
        data_name: String,
    },

    // =========================================================================
    // DISCLOSURE GATE (time-gated pulls)
    // =========================================================================
    /// The encrypted payload of an entry was pulled.
    PushEncryptedData {
        #[serde(with = "hex::serde")]
        payload: Vec<u8>,
        owner: String,
        data_name: String,
        #[serde(with = "hex::serde")]
        hash: Hash,
    },

    /// The decryption key of an entry was pulled.
    PushPrivateKey {
        #[serde(with = "hex::serde")]
        key: Vec<u8>,
        owner: String,
        data_name: String,
        #[serde(with = "hex::serde")]
        hash: Hash,
    },
}

impl DisclosureEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::KeyReleaseRequested { .. } | Self::KeyReleased { .. } => EventTopic::Upkeep,
            Self::PushEncryptedData { .. } | Self::PushPrivateKey { .. } => EventTopic::Disclosure,
        }
    }

    /// Short name of the event kind, used as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::KeyReleaseRequested { .. } => "KeyReleaseRequested",
            Self::KeyReleased { .. } => "KeyReleased",
            Self::PushEncryptedData { .. } => "PushEncryptedData",
            Self::PushPrivateKey { .. } => "PushPrivateKey",
        }
    }

    /// Owner of the entry the event is about.
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Self::KeyReleaseRequested { owner, .. }
            | Self::KeyReleased { owner, .. }
            | Self::PushEncryptedData { owner, .. }
            | Self::PushPrivateKey { owner, .. } => owner,
        }
    }

    /// Data name of the entry the event is about.
    #[must_use]
    pub fn data_name(&self) -> &str {
        match self {
            Self::KeyReleaseRequested { data_name, .. }
            | Self::KeyReleased { data_name, .. }
            | Self::PushEncryptedData { data_name, .. }
            | Self::PushPrivateKey { data_name, .. } => data_name,
        }
    }

    /// Entry id, for the events that carry one.
    #[must_use]
    pub fn entry_id(&self) -> Option<EntryId> {
        match self {
            Self::KeyReleaseRequested { id, .. } | Self::KeyReleased { id, .. } => Some(*id),
            Self::PushEncryptedData { .. } | Self::PushPrivateKey { .. } => None,
        }
    }

    /// JSON form for relays.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Phase transitions applied by upkeep.
    Upkeep,
    /// Payload and key pulls through the gate.
    Disclosure,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Owners to include. Empty means all owners.
    pub owners: Vec<String>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            owners: Vec::new(),
        }
    }

    /// Create a filter for events about a single owner's entries.
    #[must_use]
    pub fn owner(owner: impl Into<String>) -> Self {
        Self {
            topics: Vec::new(),
            owners: vec![owner.into()],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &DisclosureEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let owner_match =
            self.owners.is_empty() || self.owners.iter().any(|o| o == event.owner());

        topic_match && owner_match
    }
}

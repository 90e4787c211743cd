//! # Event Log
//!
//! Append-only record of every event the engine emitted. Pollers read it by
//! sequence number; an optional bus receives each event after it has been
//! recorded.

use crate::events::{DisclosureEvent, EventFilter};
use crate::publisher::{EventPublisher, InMemoryEventBus};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;
use uuid::Uuid;

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedEvent {
    /// Position in the log, starting at 1.
    pub sequence: u64,
    /// Unique id of this emission.
    pub event_id: Uuid,
    /// The event itself.
    pub event: DisclosureEvent,
}

/// Append-only event log.
///
/// Records are never removed or rewritten. Sequence numbers are dense and
/// strictly increasing in emission order.
pub struct EventLog {
    records: RwLock<Vec<LoggedEvent>>,
    forward: Option<Arc<InMemoryEventBus>>,
}

impl EventLog {
    /// Create an empty log that only records.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            forward: None,
        }
    }

    /// Create an empty log that also forwards every event to `bus`.
    #[must_use]
    pub fn with_forward(bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            forward: Some(bus),
        }
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Sequence number of the last record, 0 when empty.
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.records.read().last().map_or(0, |r| r.sequence)
    }

    /// Copy of every record in emission order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LoggedEvent> {
        self.records.read().clone()
    }

    /// Just the events, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<DisclosureEvent> {
        self.records.read().iter().map(|r| r.event.clone()).collect()
    }

    /// Records with a sequence number strictly greater than `sequence`.
    #[must_use]
    pub fn since(&self, sequence: u64) -> Vec<LoggedEvent> {
        let records = self.records.read();
        // Sequence n lives at index n - 1
        let start = usize::try_from(sequence).unwrap_or(usize::MAX).min(records.len());
        records[start..].to_vec()
    }

    /// Records whose event matches `filter`.
    #[must_use]
    pub fn matching(&self, filter: &EventFilter) -> Vec<LoggedEvent> {
        self.records
            .read()
            .iter()
            .filter(|r| filter.matches(&r.event))
            .cloned()
            .collect()
    }

    fn append(&self, event: DisclosureEvent) -> LoggedEvent {
        let mut records = self.records.write();
        let record = LoggedEvent {
            sequence: records.len() as u64 + 1,
            event_id: Uuid::new_v4(),
            event,
        };
        records.push(record.clone());
        record
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for EventLog {
    fn publish(&self, event: DisclosureEvent) -> usize {
        let record = self.append(event);
        trace!(
            sequence = record.sequence,
            kind = record.event.kind(),
            "Event recorded"
        );

        match &self.forward {
            Some(bus) => bus.publish(record.event),
            None => 0,
        }
    }

    fn events_published(&self) -> u64 {
        self.records.read().len() as u64
    }
}

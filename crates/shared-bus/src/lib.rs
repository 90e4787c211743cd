//! # Shared Bus - Disclosure Notifications
//!
//! The engine emits four kinds of notification and hands them to an
//! [`EventPublisher`]. What happens next (fan-out, persistence, relaying to
//! browsers) belongs to the publisher, never to the engine.
//!
//! ```text
//! ┌──────────────────┐   publish()   ┌──────────────┐  forward  ┌────────────────┐
//! │ Disclosure core  │ ────────────→ │   EventLog   │ ────────→ │ InMemoryEvent  │
//! │ (upkeep, gate)   │               │ (append-only)│           │ Bus (fan-out)  │
//! └──────────────────┘               └──────────────┘           └───────┬────────┘
//!                                          ↑ since(seq)                 │ subscribe()
//!                                       pollers                     subscribers
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod event_log;
pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use event_log::{EventLog, LoggedEvent};
pub use events::{DisclosureEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

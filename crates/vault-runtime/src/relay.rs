//! # Event Relay
//!
//! Subscribes to the bus and writes every event to the structured log as
//! its JSON wire form. Stands in for a transport towards recipients.

use shared_bus::{DisclosureEvent, EventFilter, InMemoryEventBus, Subscription};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use vault_telemetry::log_event;

/// Forwards bus events to the log until shutdown.
pub struct EventRelay {
    subscription: Subscription,
}

impl EventRelay {
    pub fn new(bus: &InMemoryEventBus, filter: EventFilter) -> Self {
        Self {
            subscription: bus.subscribe(filter),
        }
    }

    /// Logs a single event and returns its JSON form.
    pub fn relay(event: &DisclosureEvent) -> Option<String> {
        match event.to_json() {
            Ok(json) => {
                log_event!(
                    info,
                    "relay",
                    "Event relayed",
                    kind = event.kind(),
                    owner = %event.owner(),
                    data_name = %event.data_name()
                );
                debug!(body = %json, "Relayed event body");
                Some(json)
            }
            Err(e) => {
                warn!(kind = event.kind(), error = %e, "Event could not be encoded");
                None
            }
        }
    }

    /// Runs until `shutdown` flips, its sender is dropped, or the bus closes.
    ///
    /// Returns the number of events relayed.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut relayed = 0u64;
        loop {
            tokio::select! {
                event = self.subscription.recv() => {
                    let Some(event) = event else {
                        info!(relayed, "Event bus closed, relay stopping");
                        break;
                    };
                    if Self::relay(&event).is_some() {
                        relayed += 1;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!(relayed, "Relay shutdown signal received");
                        break;
                    }
                }
            }
        }
        relayed
    }
}

//! # Upkeep Scheduler
//!
//! Phase state machine driven by an external trigger.
//!
//! ```text
//! [Pending] ──RequestRelease──→ [ReleaseRequested] ──FinalizeRelease──→ [Released]
//!   now >= release - window          now >= release
//! ```
//!
//! Checking and applying are separate calls. `check_due` is a pure read
//! and may run concurrently with other reads; `apply` re-validates every
//! proposal against the store at commit time, because an arbitrary amount
//! of time and other `apply` calls may sit between the two. A proposal whose
//! precondition no longer holds is skipped, not reported as an error.

use super::config::DisclosureConfig;
use super::entry::Entry;
use super::store::EntryStore;
use serde::{Deserialize, Serialize};
use shared_bus::DisclosureEvent;
use shared_types::{EntryId, Phase, Timestamp};
use tracing::{debug, info};

/// A proposed phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "camelCase")]
pub enum UpkeepAction {
    /// `Pending → ReleaseRequested`
    RequestRelease(EntryId),
    /// `ReleaseRequested → Released`
    FinalizeRelease(EntryId),
}

impl UpkeepAction {
    /// Entry the action targets.
    pub fn id(&self) -> EntryId {
        match self {
            Self::RequestRelease(id) | Self::FinalizeRelease(id) => *id,
        }
    }

    /// Phase the entry must be in for the action to apply.
    pub fn from_phase(&self) -> Phase {
        match self {
            Self::RequestRelease(_) => Phase::Pending,
            Self::FinalizeRelease(_) => Phase::ReleaseRequested,
        }
    }

    /// Stable label, used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RequestRelease(_) => "request_release",
            Self::FinalizeRelease(_) => "finalize_release",
        }
    }
}

/// Result of a pure upkeep check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpkeepCheck {
    /// Whether any transition is due.
    pub upkeep_needed: bool,
    /// Due transitions, in id order.
    pub proposals: Vec<UpkeepAction>,
}

/// What an `apply` call did with its proposals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpkeepReport {
    /// Proposals that advanced an entry, in application order.
    pub applied: Vec<UpkeepAction>,
    /// Proposals whose precondition no longer held.
    pub skipped: Vec<UpkeepAction>,
}

impl UpkeepReport {
    /// Whether nothing changed.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Proposes and applies phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpkeepScheduler {
    pre_release_window_secs: u64,
    max_batch: usize,
}

impl UpkeepScheduler {
    pub fn new(pre_release_window_secs: u64, max_batch: usize) -> Self {
        Self {
            pre_release_window_secs,
            max_batch: max_batch.max(1),
        }
    }

    pub fn from_config(config: &DisclosureConfig) -> Self {
        Self::new(config.pre_release_window_secs, config.max_upkeep_batch)
    }

    pub fn pre_release_window_secs(&self) -> u64 {
        self.pre_release_window_secs
    }

    /// Earliest time at which an entry releasing at `release_time` may be
    /// moved to `ReleaseRequested`.
    pub fn request_horizon(&self, release_time: Timestamp) -> Timestamp {
        release_time.saturating_sub(self.pre_release_window_secs)
    }

    /// The transition due for `entry` at `now`, if any.
    pub fn due_action(&self, entry: &Entry, now: Timestamp) -> Option<UpkeepAction> {
        match entry.phase() {
            Phase::Pending if now >= self.request_horizon(entry.release_time()) => {
                Some(UpkeepAction::RequestRelease(entry.id()))
            }
            Phase::ReleaseRequested if now >= entry.release_time() => {
                Some(UpkeepAction::FinalizeRelease(entry.id()))
            }
            _ => None,
        }
    }

    /// Due transitions at `current_time`, capped at the configured batch size.
    pub fn check_due(&self, store: &EntryStore, current_time: Timestamp) -> UpkeepCheck {
        self.check_due_bounded(store, current_time, self.max_batch)
    }

    /// Due transitions at `current_time`, at most `limit` of them.
    ///
    /// Only entries whose release time falls before `current_time + window`
    /// are visited; nothing is mutated.
    pub fn check_due_bounded(
        &self,
        store: &EntryStore,
        current_time: Timestamp,
        limit: usize,
    ) -> UpkeepCheck {
        let horizon = current_time.saturating_add(self.pre_release_window_secs);
        let mut proposals: Vec<UpkeepAction> = store
            .unreleased_until(horizon)
            .filter_map(|entry| self.due_action(entry, current_time))
            .collect();

        // Index order is by release time; callers see id order.
        proposals.sort_unstable_by_key(UpkeepAction::id);
        proposals.truncate(limit);

        UpkeepCheck {
            upkeep_needed: !proposals.is_empty(),
            proposals,
        }
    }

    /// Applies `proposals` in order against the current store state.
    ///
    /// Returns the report and the events to emit, one per applied action,
    /// in application order.
    pub fn apply(
        &self,
        store: &mut EntryStore,
        proposals: &[UpkeepAction],
        now: Timestamp,
    ) -> (UpkeepReport, Vec<DisclosureEvent>) {
        let mut report = UpkeepReport::default();
        let mut events = Vec::with_capacity(proposals.len());

        for action in proposals {
            let still_due = store
                .get(action.id())
                .and_then(|entry| self.due_action(entry, now))
                == Some(*action);

            if !still_due || !store.advance_phase(action.id(), action.from_phase()) {
                debug!(id = action.id(), action = action.label(), now, "Stale upkeep proposal skipped");
                report.skipped.push(*action);
                continue;
            }

            let Some(entry) = store.get(action.id()) else {
                continue;
            };
            info!(
                id = entry.id(),
                owner = %entry.owner(),
                data_name = %entry.data_name(),
                phase = %entry.phase(),
                "Entry phase advanced"
            );
            events.push(Self::event_for(action, entry));
            report.applied.push(*action);
        }

        (report, events)
    }

    fn event_for(action: &UpkeepAction, entry: &Entry) -> DisclosureEvent {
        let id = entry.id();
        let owner = entry.owner().to_string();
        let data_name = entry.data_name().to_string();
        match action {
            UpkeepAction::RequestRelease(_) => DisclosureEvent::KeyReleaseRequested {
                id,
                owner,
                data_name,
            },
            UpkeepAction::FinalizeRelease(_) => DisclosureEvent::KeyReleased {
                id,
                owner,
                data_name,
            },
        }
    }
}

impl Default for UpkeepScheduler {
    fn default() -> Self {
        Self::from_config(&DisclosureConfig::default())
    }
}

//! # Disclosure Service
//!
//! Wires the entry store, upkeep scheduler and disclosure gate behind the
//! [`DisclosureApi`] port.
//!
//! ## Concurrency
//!
//! The store sits behind a single `RwLock`. `add_entry`, `apply` and `clear`
//! take the write lock, so all mutations are serialized; `check_due`, the
//! gate and the views take the read lock and may run side by side. Events
//! are published while the lock is still held, so the event order matches
//! the order in which mutations were committed.

use crate::domain::{
    DisclosureConfig, DisclosureGate, DisclosureKind, Entry, EntryStore, NewEntry, PublicView,
    UpkeepAction, UpkeepCheck, UpkeepReport, UpkeepScheduler,
};
use crate::error::DisclosureResult;
use crate::metrics;
use crate::ports::inbound::DisclosureApi;
use crate::ports::outbound::TimeSource;
use parking_lot::RwLock;
use shared_bus::EventPublisher;
use shared_crypto::IntegrityValidator;
use shared_types::{EntryId, Phase, Timestamp};
use tracing::{debug, info};

/// Timed disclosure engine.
pub struct DisclosureService<T, P>
where
    T: TimeSource,
    P: EventPublisher,
{
    config: DisclosureConfig,
    store: RwLock<EntryStore>,
    scheduler: UpkeepScheduler,
    gate: DisclosureGate,
    submission_check: Option<IntegrityValidator>,
    time_source: T,
    publisher: P,
}

impl<T, P> DisclosureService<T, P>
where
    T: TimeSource,
    P: EventPublisher,
{
    pub fn new(config: DisclosureConfig, time_source: T, publisher: P) -> Self {
        info!(
            window_secs = config.pre_release_window_secs,
            max_batch = config.max_upkeep_batch,
            verify_on_add = config.checks_on_add(),
            verify_on_disclosure = config.verify_on_disclosure,
            "Disclosure service created"
        );
        Self {
            scheduler: UpkeepScheduler::from_config(&config),
            gate: DisclosureGate::new(config.verify_on_disclosure),
            submission_check: config.checks_on_add().then(IntegrityValidator::new),
            store: RwLock::new(EntryStore::new()),
            config,
            time_source,
            publisher,
        }
    }

    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Current time according to the injected time source.
    pub fn now(&self) -> Timestamp {
        self.time_source.now()
    }

    /// Applies `proposals` as if the clock read `now`.
    ///
    /// `apply` uses the time source; this is the same commit path with an
    /// explicit timestamp, for drivers that carry their own clock.
    pub fn apply_at(&self, proposals: &[UpkeepAction], now: Timestamp) -> UpkeepReport {
        let mut store = self.store.write();
        let (report, events) = self.scheduler.apply(&mut store, proposals, now);

        for action in &report.applied {
            match action {
                UpkeepAction::RequestRelease(_) => metrics::record_release_requested(),
                UpkeepAction::FinalizeRelease(_) => metrics::record_released(),
            }
        }
        if !report.skipped.is_empty() {
            debug!(skipped = report.skipped.len(), now, "Stale upkeep proposals ignored");
            metrics::record_stale_proposals(report.skipped.len() as u64);
        }

        for event in events {
            self.publisher.publish(event);
        }
        report
    }

    fn disclose(&self, id: EntryId, kind: DisclosureKind) -> DisclosureResult<Vec<u8>> {
        let now = self.time_source.now();
        let store = self.store.read();

        match self.gate.release(&store, id, kind, now) {
            Ok(disclosure) => {
                info!(id, kind = %kind, now, "Disclosed");
                metrics::record_disclosure(kind.label());
                self.publisher.publish(disclosure.event);
                Ok(disclosure.bytes)
            }
            Err(err) => {
                debug!(id, kind = %kind, now, error = %err, "Disclosure refused");
                metrics::record_disclosure_refused(err.label());
                Err(err)
            }
        }
    }
}

impl<T, P> DisclosureApi for DisclosureService<T, P>
where
    T: TimeSource,
    P: EventPublisher,
{
    fn add_entry(&self, submission: NewEntry) -> DisclosureResult<EntryId> {
        let now = self.time_source.now();
        let owner = submission.owner.clone();
        let data_name = submission.data_name.clone();
        let release_time = submission.release_time;

        let mut store = self.store.write();
        match store.insert(submission, now, self.submission_check.as_ref()) {
            Ok(id) => {
                info!(id, owner = %owner, data_name = %data_name, release_time, "Entry added");
                metrics::record_entry_added();
                metrics::set_entries_stored(store.len());
                Ok(id)
            }
            Err(err) => {
                debug!(owner = %owner, data_name = %data_name, error = %err, "Submission rejected");
                metrics::record_entry_rejected(err.label());
                Err(err)
            }
        }
    }

    fn list_all(&self) -> Vec<Entry> {
        self.store.read().entries().to_vec()
    }

    fn get_public_view(&self, data_name: &str, owner: &str) -> DisclosureResult<PublicView> {
        self.store.read().public_view(data_name, owner)
    }

    fn get_entry(&self, id: EntryId) -> DisclosureResult<Entry> {
        self.store.read().require(id).cloned()
    }

    fn phase_of(&self, id: EntryId) -> DisclosureResult<Phase> {
        self.store.read().require(id).map(Entry::phase)
    }

    fn check_due(&self, current_time: Timestamp) -> UpkeepCheck {
        self.scheduler.check_due(&self.store.read(), current_time)
    }

    fn check_due_bounded(&self, current_time: Timestamp, limit: usize) -> UpkeepCheck {
        let limit = limit.min(self.config.max_upkeep_batch);
        self.scheduler
            .check_due_bounded(&self.store.read(), current_time, limit)
    }

    fn apply(&self, proposals: &[UpkeepAction]) -> UpkeepReport {
        self.apply_at(proposals, self.time_source.now())
    }

    fn run_upkeep(&self) -> UpkeepReport {
        let now = self.time_source.now();
        let check = self.check_due(now);
        if !check.upkeep_needed {
            return UpkeepReport::default();
        }
        self.apply_at(&check.proposals, now)
    }

    fn send_payload(&self, id: EntryId) -> DisclosureResult<Vec<u8>> {
        self.disclose(id, DisclosureKind::Payload)
    }

    fn send_decryption_key(&self, id: EntryId) -> DisclosureResult<Vec<u8>> {
        self.disclose(id, DisclosureKind::Key)
    }

    fn clear(&self) {
        let mut store = self.store.write();
        let removed = store.len();
        store.clear();
        metrics::set_entries_stored(0);
        info!(removed, next_id = store.next_id(), "All entries cleared");
    }

    fn entry_count(&self) -> usize {
        self.store.read().len()
    }
}

impl<T, P> std::fmt::Debug for DisclosureService<T, P>
where
    T: TimeSource,
    P: EventPublisher,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisclosureService")
            .field("config", &self.config)
            .field("entries", &self.store.read().len())
            .finish_non_exhaustive()
    }
}

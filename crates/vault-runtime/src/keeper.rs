//! # Upkeep Keeper
//!
//! The periodic trigger that drives the phase machine. Each tick runs one
//! check-then-apply cycle against the wall clock; stale proposals are
//! absorbed by the engine, so overlapping or delayed ticks are harmless.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use tv_01_disclosure::{DisclosureApi, UpkeepReport};
use vault_telemetry::log_event;

/// Runs upkeep on a fixed interval until shutdown.
pub struct Keeper<S>
where
    S: DisclosureApi + 'static,
{
    service: Arc<S>,
    interval: Duration,
}

impl<S> Keeper<S>
where
    S: DisclosureApi + 'static,
{
    pub fn new(service: Arc<S>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// One upkeep cycle.
    pub fn tick(&self) -> UpkeepReport {
        let report = self.service.run_upkeep();
        if report.is_noop() && report.skipped.is_empty() {
            debug!("Upkeep cycle: nothing due");
        } else {
            log_event!(
                info,
                "keeper",
                "Upkeep cycle finished",
                applied = report.applied.len(),
                skipped = report.skipped.len()
            );
        }
        report
    }

    /// Ticks until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// Returns the number of cycles run.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycles = 0u64;

        info!(interval_secs = self.interval.as_secs(), "Keeper started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick();
                    cycles += 1;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!(cycles, "Keeper shutdown signal received");
                        break;
                    }
                }
            }
        }
        cycles
    }
}

//! # Timelock-Vault Runtime
//!
//! Hosts the disclosure engine and drives its upkeep.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize structured logging
//! 3. Build the event bus, event log and disclosure service
//! 4. Load seed submissions (if `TV_SEED_FILE` is set)
//! 5. Spawn the event relay and the upkeep keeper
//! 6. Wait for Ctrl+C, then shut both down
//!
//! ```text
//! Keeper ──run_upkeep──→ DisclosureService ──events──→ EventLog ──forward──→ InMemoryEventBus
//!                                                                                  │
//!                                                                           EventRelay → log
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use shared_bus::{EventFilter, EventLog, InMemoryEventBus};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use tv_01_disclosure::{DisclosureApi, DisclosureService, SystemTimeSource};
use vault_runtime::{load_seed_file, seed, EventRelay, Keeper, RuntimeConfig};
use vault_telemetry::{init_logging, render_metrics};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load runtime configuration")?;
    init_logging(&config.telemetry).context("Failed to initialize logging")?;

    info!("===========================================");
    info!("  Timelock-Vault Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!(
        service = %config.telemetry.service_name,
        interval_secs = config.upkeep_interval.as_secs(),
        window_secs = config.disclosure.pre_release_window_secs,
        "Configuration loaded"
    );

    let bus = Arc::new(InMemoryEventBus::new());
    let event_log = Arc::new(EventLog::with_forward(Arc::clone(&bus)));
    let service = Arc::new(DisclosureService::new(
        config.disclosure.clone(),
        SystemTimeSource,
        Arc::clone(&event_log),
    ));

    if let Some(path) = &config.seed_file {
        let entries = load_seed_file(path).context("Failed to load seed submissions")?;
        let (accepted, rejected) = seed::submit_all(service.as_ref(), entries);
        info!(accepted, rejected, path = %path.display(), "Seed file loaded");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let relay = EventRelay::new(&bus, EventFilter::all());
    let relay_handle = tokio::spawn(relay.run(shutdown_rx.clone()));

    let keeper = Keeper::new(Arc::clone(&service), config.upkeep_interval);
    let keeper_handle = tokio::spawn(keeper.run(shutdown_rx));

    info!(entries = service.entry_count(), "Runtime ready, press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Initiating graceful shutdown...");
    if let Err(e) = shutdown_tx.send(true) {
        error!("Failed to send shutdown signal: {}", e);
    }

    let cycles = keeper_handle.await.context("Keeper task failed")?;
    let relayed = relay_handle.await.context("Relay task failed")?;
    info!(cycles, relayed, events = event_log.len(), "Shutdown complete");

    match render_metrics() {
        Ok(text) => debug!(metrics = %text, "Final metrics"),
        Err(e) => warn!(error = %e, "Failed to render metrics"),
    }

    Ok(())
}

//! Shared fixtures for the integration tests.

use rand::RngCore;
use shared_bus::{EventLog, InMemoryEventBus};
use shared_crypto::keccak256;
use shared_types::Timestamp;
use std::sync::Arc;
use tv_01_disclosure::{DisclosureConfig, DisclosureService, ManualTimeSource, NewEntry};

/// 2023-11-14T22:13:20Z, the clock every scenario starts from.
pub const T0: Timestamp = 1_700_000_000;
pub const HOUR: u64 = 3_600;
pub const DAY: u64 = 24 * HOUR;

pub type TestService = DisclosureService<Arc<ManualTimeSource>, Arc<EventLog>>;

/// A service on a manual clock, recording into an event log that forwards
/// to a bus.
pub struct Harness {
    pub service: Arc<TestService>,
    pub clock: Arc<ManualTimeSource>,
    pub log: Arc<EventLog>,
    pub bus: Arc<InMemoryEventBus>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(DisclosureConfig::default())
    }

    pub fn with_config(config: DisclosureConfig) -> Self {
        let clock = Arc::new(ManualTimeSource::new(T0));
        let bus = Arc::new(InMemoryEventBus::new());
        let log = Arc::new(EventLog::with_forward(Arc::clone(&bus)));
        let service = Arc::new(DisclosureService::new(
            config,
            Arc::clone(&clock),
            Arc::clone(&log),
        ));
        Self {
            service,
            clock,
            log,
            bus,
        }
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.log.events().iter().map(|e| e.kind()).collect()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Submission with a correct content hash.
pub fn submission(
    owner: &str,
    data_name: &str,
    payload: &[u8],
    key: &[u8],
    release_time: Timestamp,
) -> NewEntry {
    NewEntry::new(
        payload.to_vec(),
        key.to_vec(),
        owner,
        data_name,
        release_time,
        keccak256(payload),
    )
}

/// Submission with random payload and key bytes.
pub fn random_submission(owner: &str, data_name: &str, release_time: Timestamp) -> NewEntry {
    let mut rng = rand::thread_rng();
    let mut payload = vec![0u8; 64];
    let mut key = vec![0u8; 32];
    rng.fill_bytes(&mut payload);
    rng.fill_bytes(&mut key);
    submission(owner, data_name, &payload, &key, release_time)
}

//! # tv-01-disclosure
//!
//! Timed disclosure engine: encrypted payloads and their decryption keys are
//! held until a release time, then handed out on request.
//!
//! ## Overview
//!
//! - **Entry store**: ordered, append-only records with dense ids that are
//!   never reused
//! - **Upkeep**: a two-step phase machine driven by an external trigger,
//!   split into a pure check and a re-validating apply
//! - **Disclosure gate**: time-gated pulls of payload and key
//!
//! ## Architecture
//!
//! ```text
//! Submitter ──add_entry──→ EntryStore
//!                              │
//! Keeper ──check_due/apply──→  ├── KeyReleaseRequested / KeyReleased ──→ EventPublisher
//!                              │
//! Recipient ──send_*───────→   └── PushEncryptedData / PushPrivateKey ──→ EventPublisher
//! ```
//!
//! ## Phases
//!
//! ```text
//! [Pending] ──(now >= release - window)──→ [ReleaseRequested] ──(now >= release)──→ [Released]
//! ```
//!
//! The gate ignores the phase entirely; it only compares the clock against
//! the release time.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tv_01_disclosure::{DisclosureApi, DisclosureConfig, DisclosureService, NewEntry, SystemTimeSource};
//! use shared_bus::InMemoryEventBus;
//!
//! let service = DisclosureService::new(
//!     DisclosureConfig::default(),
//!     SystemTimeSource,
//!     Arc::new(InMemoryEventBus::new()),
//! );
//!
//! let id = service.add_entry(submission)?;
//! let report = service.run_upkeep();
//! let key = service.send_decryption_key(id)?;
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{
    Disclosure, DisclosureConfig, DisclosureGate, DisclosureKind, Entry, EntryStore, NewEntry,
    PublicView, UpkeepAction, UpkeepCheck, UpkeepReport, UpkeepScheduler,
    DEFAULT_MAX_UPKEEP_BATCH, DEFAULT_PRE_RELEASE_WINDOW_SECS,
};
pub use error::{DisclosureError, DisclosureResult, EntryLookup, ValidationError};
pub use ports::inbound::DisclosureApi;
pub use ports::outbound::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use service::DisclosureService;

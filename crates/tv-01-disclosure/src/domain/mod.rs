//! Domain layer: entries, the store, upkeep and the disclosure gate.

pub mod config;
pub mod entry;
pub mod gate;
pub mod store;
pub mod upkeep;

pub use config::{DisclosureConfig, DEFAULT_MAX_UPKEEP_BATCH, DEFAULT_PRE_RELEASE_WINDOW_SECS};
pub use entry::{Entry, NewEntry, PublicView};
pub use gate::{Disclosure, DisclosureGate, DisclosureKind};
pub use store::EntryStore;
pub use upkeep::{UpkeepAction, UpkeepCheck, UpkeepReport, UpkeepScheduler};

//! # Vault Runtime Library
//!
//! Building blocks of the `vault-runtime` binary, exposed for testing.
//!
//! - `config`: environment-driven runtime configuration
//! - `keeper`: the periodic upkeep trigger
//! - `relay`: forwards bus events to the structured log
//! - `seed`: loads initial submissions from a JSON file

pub mod config;
pub mod keeper;
pub mod relay;
pub mod seed;

pub use config::{ConfigError, RuntimeConfig};
pub use keeper::Keeper;
pub use relay::EventRelay;
pub use seed::{load_seed_file, SeedError};

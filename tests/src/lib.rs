//! # Timelock-Vault Test Suite
//!
//! Cross-crate tests for the disclosure engine.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs     # End-to-end lifecycles against a manual clock
//!     ├── upkeep_races.rs  # Stale proposals, concurrent check/apply
//!     └── event_flow.rs    # EventLog → bus → subscribers and relay
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tv-tests
//! cargo test -p tv-tests integration::upkeep_races::
//!
//! # Benchmarks
//! cargo bench -p tv-tests
//! ```

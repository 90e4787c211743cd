//! Hexagonal ports.
//!
//! - `inbound`: the API the engine offers its drivers
//! - `outbound`: what the engine needs from its host

pub mod inbound;
pub mod outbound;

pub use inbound::DisclosureApi;
pub use outbound::{ManualTimeSource, SystemTimeSource, TimeSource};

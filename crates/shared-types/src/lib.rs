//! # Shared Types Crate
//!
//! Primitives used across the disclosure engine, the event bus and the
//! runtime.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-crate types are defined here once.
//! - **Plain Data**: No behaviour beyond ordering and phase arithmetic; the
//!   engine owns all mutation rules.

pub mod entities;

pub use entities::*;

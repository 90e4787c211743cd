//! # Shared Crypto - Content Integrity
//!
//! The engine never encrypts or decrypts; it only digests the already
//! encrypted bytes it is handed and re-checks them before disclosure.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Content digest of encrypted payloads |
//! | `integrity` | Keccak-256 compare | Tamper detection between storage and release |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod integrity;

// Re-exports
pub use errors::CryptoError;
pub use hashing::keccak256;
pub use integrity::IntegrityValidator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Keccak-256 Hashing
//!
//! Content digests for stored payloads. Keccak-256 (the pre-standard SHA-3
//! padding) so digests match what submitters compute with common web3
//! tooling.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

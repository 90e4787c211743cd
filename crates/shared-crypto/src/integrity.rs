//! # Integrity Validator
//!
//! Computes and compares content digests over payload bytes. Used when an
//! entry is stored (optionally) and again when it is disclosed, so that any
//! change to the stored bytes surfaces as an error instead of passing
//! silently.

use crate::errors::CryptoError;
use crate::hashing::keccak256;
use shared_types::Hash;

/// Keccak-256 integrity validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrityValidator;

impl IntegrityValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }

    /// Digest of `payload`.
    pub fn digest(&self, payload: &[u8]) -> Hash {
        keccak256(payload)
    }

    /// Whether `payload` digests to `claimed`.
    pub fn verify(&self, payload: &[u8], claimed: &Hash) -> bool {
        self.digest(payload) == *claimed
    }

    /// Like [`verify`](Self::verify) but returns the digest, or both
    /// digests on mismatch.
    pub fn ensure(&self, payload: &[u8], claimed: &Hash) -> Result<Hash, CryptoError> {
        let actual = self.digest(payload);
        if actual == *claimed {
            return Ok(actual);
        }
        Err(CryptoError::IntegrityMismatch {
            expected: *claimed,
            actual,
        })
    }
}

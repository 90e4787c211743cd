//! Crypto error types.

use shared_types::Hash;
use thiserror::Error;

/// Integrity errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Payload digest does not match the claimed hash
    #[error("Integrity mismatch: expected {}, computed {}", hex::encode(.expected), hex::encode(.actual))]
    IntegrityMismatch {
        /// Claimed digest
        expected: Hash,
        /// Digest of the bytes actually held
        actual: Hash,
    },
}

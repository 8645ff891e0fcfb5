//! Error types for the cryptographic adapter layer.

use thiserror::Error;

/// Errors surfaced by the cipher adapters and the random source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material does not match the selected cipher's key length
    #[error("invalid key length: cipher requires {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Key length the selected cipher requires
        expected: usize,
        /// Length of the key material supplied
        actual: usize,
    },

    /// Initialization vector does not match the cipher's block length
    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength {
        /// IV length the cipher requires
        expected: usize,
        /// Length of the IV supplied
        actual: usize,
    },

    /// Block-chaining mode was given input that is not block-aligned
    #[error("input length {len} is not a multiple of the {block} byte block size")]
    NotBlockAligned {
        /// Length of the offending input
        len: usize,
        /// Cipher block size
        block: usize,
    },

    /// Random source asked for more bytes than its budget allows
    #[error("random source exhausted: requested {requested} bytes, {remaining} remaining")]
    RandomnessExhausted {
        /// Bytes requested by the failing draw
        requested: usize,
        /// Bytes the budget had left
        remaining: usize,
    },
}

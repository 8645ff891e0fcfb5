//! Error taxonomy for session seal/open operations.
//!
//! The open side is deliberately coarse: distinguishing a base64 error from
//! a MAC mismatch to an external caller would hand an attacker a decryption
//! oracle. All verification-path failures collapse into one variant.

use thiserror::Error;

use wafer_crypto::CryptoError;

use crate::keys::KeySetError;

/// Failures surfaced to callers of seal/open. Never retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The cookie could not be opened.
    ///
    /// Covers malformed transport text, decrypt failure, envelope framing
    /// mismatch, MAC mismatch against every candidate key, payload decode
    /// failure, and expiry. Which of these occurred is intentionally not
    /// reported.
    #[error("session cookie failed verification")]
    Deserialization,

    /// The session value could not be serialized for sealing.
    #[error("session value failed to serialize")]
    Serialization,

    /// The serialized session value exceeds what an envelope may carry.
    ///
    /// The decoder rejects larger segments, so sealing such a payload would
    /// mint a cookie the open side can never open. Refused up front instead.
    #[error("session payload too large: {len} bytes exceeds {max}")]
    PayloadTooLarge {
        /// Serialized payload length
        len: usize,
        /// Largest payload an envelope accepts
        max: usize,
    },

    /// The random source could not cover a draw during seal.
    #[error("random source exhausted: requested {requested} bytes, {remaining} remaining")]
    RandomnessExhausted {
        /// Bytes the failing draw requested
        requested: usize,
        /// Bytes the budget had left
        remaining: usize,
    },

    /// The server key set produced no usable key.
    #[error("server key set unavailable")]
    KeySetUnavailable,
}

impl From<KeySetError> for SessionError {
    fn from(_: KeySetError) -> Self {
        Self::KeySetUnavailable
    }
}

/// Seal-side conversion: randomness budget failures keep their context,
/// anything else means the key set handed us material the configured suite
/// cannot use.
impl From<CryptoError> for SessionError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::RandomnessExhausted { requested, remaining } => {
                Self::RandomnessExhausted { requested, remaining }
            },
            CryptoError::InvalidKeyLength { .. }
            | CryptoError::InvalidIvLength { .. }
            | CryptoError::NotBlockAligned { .. } => Self::KeySetUnavailable,
        }
    }
}

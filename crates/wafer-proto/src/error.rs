//! Error types for envelope framing and transport decoding.
//!
//! These variants distinguish parse failures precisely for diagnostics and
//! fuzzing; the session layer collapses all of them into its single opaque
//! verification failure before anything reaches an external caller.

use thiserror::Error;

/// Errors from envelope framing or cookie transport decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Input ended before a declared segment was complete
    #[error("envelope truncated: needed {expected} more bytes, found {actual}")]
    Truncated {
        /// Bytes the current segment still required
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Bytes remained after the final segment
    #[error("envelope has {count} trailing bytes after the MAC segment")]
    TrailingBytes {
        /// Number of unconsumed bytes
        count: usize,
    },

    /// A declared segment length exceeds the sanity cap
    #[error("envelope segment of {len} bytes exceeds the {max} byte limit")]
    SegmentTooLarge {
        /// Declared segment length
        len: usize,
        /// Maximum accepted segment length
        max: usize,
    },

    /// Cookie text is not valid base64 or is shorter than one IV
    #[error("cookie transport decoding failed: {0}")]
    Transport(String),
}

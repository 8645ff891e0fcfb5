//! Wafer Envelope Framing
//!
//! The binary record a session cookie carries and the transport encoding it
//! crosses the HTTP boundary in.
//!
//! Layout, innermost first:
//!
//! ```text
//! Envelope (plaintext): [payload_len][payload][padding_len][padding][mac_len][mac]
//!        │ encrypt under the server key
//!        ▼
//! IV || ciphertext
//!        │ base64 (URL-safe, no padding)
//!        ▼
//! SealedCookie: the cookie value itself
//! ```
//!
//! The MAC covers the length-prefixed framing of payload and padding
//! (everything up to, and excluding, the MAC field), so neither can be
//! altered independently of the key without detection.
//!
//! This crate performs no cryptography; it defines the shapes and the
//! framing. Encryption and verification live in `wafer-core`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod envelope;
pub mod error;
pub mod wire;

pub use envelope::Envelope;
pub use error::EnvelopeError;
pub use wire::SealedCookie;

//! Wafer Session Cookie Core
//!
//! An authenticated, encrypted session-cookie envelope: a stateless server
//! embeds arbitrary serializable session data in a browser cookie with
//! confidentiality, integrity, and tamper-evidence, across a configurable
//! matrix of hash algorithms, block ciphers, and cipher modes, with rolling
//! key rotation.
//!
//! # Pipeline
//!
//! ```text
//! seal: value ──CBOR──► payload ──pad──► envelope ──HMAC──► MAC
//!            ──encrypt (fresh IV)──► IV || ciphertext ──base64──► cookie
//!
//! open: cookie ──base64──► IV || ciphertext
//!       for each candidate key, newest first:
//!           decrypt ──parse──► envelope ──HMAC──► constant-time compare
//!       first match ──CBOR──► value (expiry checked if configured)
//! ```
//!
//! # Security
//!
//! - Confidentiality: payloads are encrypted under the current server key
//!   with a fresh IV per operation
//! - Integrity: the MAC covers payload and padding; any change without the
//!   key is detected
//! - No oracle: every open-side failure (transport, decrypt, framing, MAC,
//!   expiry) surfaces as the single [`SessionError::Deserialization`]
//!   variant, so callers cannot distinguish which check failed
//! - Rotation: cookies sealed under a recently retired key keep opening
//!   while that key remains in the validation list
//!
//! Integrity is scoped to "no one without the key": a holder of the
//! encryption key can always construct a validly-MAC'd cookie with a chosen
//! payload. That is inherent to MAC-based designs, not a defect.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod keys;
pub mod open;
pub mod seal;
pub mod settings;

pub use error::SessionError;
pub use keys::{Key, KeyRing, KeySetError, PersistentKeySet, RotatingKeySet, ServerKeySet};
pub use open::open_session;
pub use seal::{Stamped, seal_session};
pub use settings::Settings;

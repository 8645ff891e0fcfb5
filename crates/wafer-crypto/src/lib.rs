//! Wafer Cryptographic Adapters
//!
//! Uniform interfaces over the hash algorithms, block ciphers, and cipher
//! modes the cookie envelope can be configured with, plus the budgeted
//! random source that feeds padding and initialization vectors.
//!
//! # Design
//!
//! All orchestration code upstream of this crate is generic over the
//! selector enums ([`HashAlgorithm`], [`BlockCipher`], [`CipherMode`]).
//! No concrete algorithm type leaks past this crate: callers hand byte
//! slices in and get byte vectors back.
//!
//! ```text
//! HashAlgorithm ──► HMAC ──► MacDigest (constant-time compare only)
//!
//! BlockCipher × CipherMode ──► CipherSuite ──► encrypt / decrypt
//!
//! RandomSource ──► draw(n) bytes, debited against a per-call budget
//! ```
//!
//! # Security
//!
//! - Mode round-trip: `decrypt(key, iv, encrypt(key, iv, m)) == m` for every
//!   supported (cipher, mode) pair and mode-compatible input length
//! - [`MacDigest`] exposes only constant-time equality; short-circuiting
//!   comparison against untrusted input is unrepresentable
//! - A [`RandomSource`] is owned by exactly one encrypt operation and
//!   enforces a hard byte budget, reported as an error rather than retried

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod error;
pub mod hash;
pub mod random;

pub use cipher::{BlockCipher, CipherMode, CipherSuite};
pub use error::CryptoError;
pub use hash::{HashAlgorithm, MacDigest};
pub use random::RandomSource;

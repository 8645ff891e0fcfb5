//! Server key storage and rotation.
//!
//! A [`ServerKeySet`] yields the key to encrypt under and the ordered list
//! of keys still acceptable for verification, newest first. Rolling key
//! rotation keeps sessions sealed under a recently retired key readable
//! until that key drops off the validation list.
//!
//! Key material is zeroized on drop, redacted from `Debug` output, and
//! never logged or serialized into the envelope.

use std::sync::RwLock;

use thiserror::Error;
use zeroize::Zeroizing;

/// Errors from key set access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeySetError {
    /// The key set cannot produce any key (empty ring or a rotation left
    /// it in an inconsistent state).
    #[error("no server key available")]
    Unavailable,
}

/// Secret key material for one key generation.
///
/// Sized by the provisioner to the configured cipher's key length; HMAC
/// itself accepts any length. The bytes are scrubbed when the last clone
/// drops.
#[derive(Clone)]
pub struct Key(Zeroizing<Vec<u8>>);

impl Key {
    /// Wrap key material.
    pub fn new(material: Vec<u8>) -> Self {
        Self(Zeroizing::new(material))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Key material never appears in logs or panic messages.
impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({} bytes, redacted)", self.0.len())
    }
}

/// One snapshot of the key set: the encryption key plus every key still
/// accepted for verification, newest first.
///
/// Invariant: `validation` is non-empty and `validation[0]` is the
/// encryption key.
#[derive(Debug, Clone)]
pub struct KeyRing {
    /// Key used for new seals
    pub encryption: Key,
    /// Keys accepted for verification, newest first
    pub validation: Vec<Key>,
}

impl KeyRing {
    /// Build a ring from the current key and older generations
    /// (newest-first).
    pub fn new(encryption: Key, older: Vec<Key>) -> Self {
        let mut validation = Vec::with_capacity(1 + older.len());
        validation.push(encryption.clone());
        validation.extend(older);
        Self { encryption, validation }
    }
}

/// Capability yielding the keys for seal and open operations.
///
/// Implementations must be safe for concurrent reads while a rotation
/// write is in progress; readers see either the old or the new ring, never
/// a partially updated one.
pub trait ServerKeySet {
    /// Produce the current key ring.
    fn keys(&self) -> Result<KeyRing, KeySetError>;
}

/// A single key that never rotates. The same key fills both positions.
#[derive(Debug, Clone)]
pub struct PersistentKeySet {
    key: Key,
}

impl PersistentKeySet {
    /// Key set over one fixed key.
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

impl ServerKeySet for PersistentKeySet {
    fn keys(&self) -> Result<KeyRing, KeySetError> {
        Ok(KeyRing::new(self.key.clone(), Vec::new()))
    }
}

/// A rotating ring of key generations, newest first.
///
/// Reads take a shared lock; [`rotate`](Self::rotate) and
/// [`retire`](Self::retire) take the exclusive lock, so every reader sees
/// a complete ring.
#[derive(Debug)]
pub struct RotatingKeySet {
    ring: RwLock<Vec<Key>>,
}

impl RotatingKeySet {
    /// Ring seeded with one initial key generation.
    pub fn new(initial: Key) -> Self {
        Self { ring: RwLock::new(vec![initial]) }
    }

    /// Install `key` as the new encryption key. Previous generations stay
    /// on the validation list until retired.
    pub fn rotate(&self, key: Key) -> Result<(), KeySetError> {
        let mut ring = self.ring.write().map_err(|_| KeySetError::Unavailable)?;
        ring.insert(0, key);
        tracing::debug!(generations = ring.len(), "rotated server key ring");
        Ok(())
    }

    /// Drop the oldest generations, keeping at most `keep`.
    ///
    /// `retire(0)` empties the ring; subsequent [`keys`](ServerKeySet::keys)
    /// calls fail until a new key is rotated in.
    pub fn retire(&self, keep: usize) -> Result<(), KeySetError> {
        let mut ring = self.ring.write().map_err(|_| KeySetError::Unavailable)?;
        if ring.len() > keep {
            ring.truncate(keep);
            tracing::debug!(generations = ring.len(), "retired old server key generations");
        }
        Ok(())
    }
}

impl ServerKeySet for RotatingKeySet {
    fn keys(&self) -> Result<KeyRing, KeySetError> {
        let ring = self.ring.read().map_err(|_| KeySetError::Unavailable)?;
        let Some((encryption, older)) = ring.split_first() else {
            return Err(KeySetError::Unavailable);
        };
        Ok(KeyRing::new(encryption.clone(), older.to_vec()))
    }
}

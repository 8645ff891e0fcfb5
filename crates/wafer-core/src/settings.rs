//! Immutable per-server protocol configuration.

use std::time::Duration;

use wafer_crypto::{BlockCipher, CipherMode, CipherSuite, HashAlgorithm};

/// Algorithm selection for seal/open, fixed for the life of the server.
///
/// Created once at startup and shared read-only by every in-flight
/// operation. Changing algorithms means sessions sealed under the old
/// settings stop verifying, which is usually the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    hash: HashAlgorithm,
    cipher: BlockCipher,
    mode: CipherMode,
    max_age: Option<Duration>,
}

impl Settings {
    /// Select algorithms with no expiry policy.
    pub fn new(hash: HashAlgorithm, cipher: BlockCipher, mode: CipherMode) -> Self {
        Self { hash, cipher, mode, max_age: None }
    }

    /// Add an expiry policy: cookies older than `max_age` fail to open.
    pub fn with_max_age(self, max_age: Duration) -> Self {
        Self { max_age: Some(max_age), ..self }
    }

    /// Configured hash algorithm.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Configured cipher/mode pair.
    pub fn suite(&self) -> CipherSuite {
        CipherSuite::new(self.cipher, self.mode)
    }

    /// Configured expiry policy, if any.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }
}

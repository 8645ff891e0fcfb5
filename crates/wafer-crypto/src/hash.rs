//! Hash algorithm adapter and MAC digests.
//!
//! The envelope authenticates its contents with HMAC over a configurable
//! SHA-2 family member. Verifiers compare digests in constant time only.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Hash algorithm used for envelope authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// HMAC-SHA-256 (32 byte digest)
    Sha256,
    /// HMAC-SHA-384 (48 byte digest)
    Sha384,
    /// HMAC-SHA-512 (64 byte digest)
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Compute the keyed digest of `data` under `key`.
    ///
    /// HMAC accepts keys of any length, so this cannot fail.
    pub fn mac(self, key: &[u8], data: &[u8]) -> MacDigest {
        let bytes = match self {
            Self::Sha256 => {
                let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
                    unreachable!("HMAC-SHA256 accepts any key size");
                };
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            },
            Self::Sha384 => {
                let Ok(mut mac) = HmacSha384::new_from_slice(key) else {
                    unreachable!("HMAC-SHA384 accepts any key size");
                };
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            },
            Self::Sha512 => {
                let Ok(mut mac) = HmacSha512::new_from_slice(key) else {
                    unreachable!("HMAC-SHA512 accepts any key size");
                };
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            },
        };

        MacDigest(bytes)
    }
}

/// A message authentication code over envelope contents.
///
/// Deliberately does not implement `PartialEq`: comparing a digest against
/// untrusted input must go through [`MacDigest::ct_eq`], which runs in
/// constant time regardless of where the digests first differ.
#[derive(Debug, Clone)]
pub struct MacDigest(Vec<u8>);

impl MacDigest {
    /// Wrap raw digest bytes parsed from an envelope.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Digest length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the digest is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constant-time equality against another digest.
    ///
    /// Length mismatch returns `false` immediately; the length of a MAC is
    /// public information (it is fixed by the configured hash algorithm).
    pub fn ct_eq(&self, other: &Self) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

//! Transport encoding of the encrypted envelope.
//!
//! The only form that crosses the system boundary: URL-safe unpadded
//! base64 of `IV || ciphertext`. Safe for `Set-Cookie` values with no raw
//! control bytes and no characters needing quoting.

use core::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::error::EnvelopeError;

/// Base64 cookie text carrying an encrypted envelope.
///
/// A newtype rather than a bare `String` so plaintext, ciphertext, and
/// transport-encoded text cannot be confused at call sites. Carries no type
/// information about the embedded session; the caller supplies the target
/// type at open time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedCookie(String);

impl SealedCookie {
    /// Encode `IV || ciphertext` as cookie text.
    pub fn from_parts(iv: &[u8], ciphertext: &[u8]) -> Self {
        let mut combined = Vec::with_capacity(iv.len() + ciphertext.len());
        combined.extend_from_slice(iv);
        combined.extend_from_slice(ciphertext);
        Self(URL_SAFE_NO_PAD.encode(combined))
    }

    /// Decode the cookie text and split off the leading `iv_len`-byte IV.
    ///
    /// # Errors
    ///
    /// `Transport` for malformed base64 or input shorter than the IV. The
    /// base64 engine rejects non-canonical encodings, so every cookie text
    /// decodes to at most one byte sequence.
    pub fn decode_parts(&self, iv_len: usize) -> Result<(Vec<u8>, Vec<u8>), EnvelopeError> {
        let combined = URL_SAFE_NO_PAD
            .decode(&self.0)
            .map_err(|e| EnvelopeError::Transport(e.to_string()))?;

        if combined.len() < iv_len {
            return Err(EnvelopeError::Transport(format!(
                "cookie holds {} bytes, shorter than the {iv_len} byte IV",
                combined.len()
            )));
        }

        let ciphertext = combined[iv_len..].to_vec();
        let mut iv = combined;
        iv.truncate(iv_len);

        Ok((iv, ciphertext))
    }

    /// The cookie text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the cookie text.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Wrap cookie text received from a request header.
impl From<String> for SealedCookie {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for SealedCookie {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl fmt::Display for SealedCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Session decryptor and verifier: transport-decode, decrypt, parse,
//! MAC-check, deserialize.
//!
//! Every candidate key from the ring is tried newest-first; the first one
//! whose recomputed MAC matches in constant time wins. All failures before
//! a verified MAC collapse into [`SessionError::Deserialization`] so that
//! callers (and attackers watching callers) cannot tell decode, decrypt,
//! framing, MAC, and expiry failures apart.

use serde::de::DeserializeOwned;
use wafer_proto::{Envelope, SealedCookie};

use crate::{
    error::SessionError,
    keys::ServerKeySet,
    seal::{Stamped, unix_now},
    settings::Settings,
};

/// Open cookie text back into the session value it was sealed from.
///
/// # Errors
///
/// - `KeySetUnavailable` if the key set yields no keys at all
/// - `Deserialization` for everything else that can go wrong with the
///   cookie itself
pub fn open_session<T: DeserializeOwned>(
    settings: &Settings,
    key_set: &dyn ServerKeySet,
    cookie: &SealedCookie,
) -> Result<T, SessionError> {
    let ring = key_set.keys()?;
    let suite = settings.suite();

    let (iv, ciphertext) =
        cookie.decode_parts(suite.iv_len()).map_err(|_| SessionError::Deserialization)?;

    for (generation, key) in ring.validation.iter().enumerate() {
        let Ok(plaintext) = suite.decrypt(key.as_bytes(), &iv, &ciphertext) else {
            continue;
        };
        let Ok(envelope) = Envelope::decode(&plaintext) else {
            continue;
        };

        let expected = settings.hash().mac(key.as_bytes(), &envelope.auth_bytes());
        if !expected.ct_eq(&envelope.mac) {
            continue;
        }

        if generation > 0 {
            tracing::debug!(generation, "session cookie verified under a previous key generation");
        }

        // MAC verified under this key: the envelope is authentic. A payload
        // that fails to decode or an expired stamp is final, not a reason
        // to try older keys.
        let stamped: Stamped<T> = ciborium::de::from_reader(envelope.payload.as_slice())
            .map_err(|_| SessionError::Deserialization)?;

        if let Some(max_age) = settings.max_age() {
            let age = unix_now().saturating_sub(stamped.issued_at);
            if age > max_age.as_secs() {
                return Err(SessionError::Deserialization);
            }
        }

        return Ok(stamped.value);
    }

    tracing::trace!("session cookie failed verification under every candidate key");
    Err(SessionError::Deserialization)
}

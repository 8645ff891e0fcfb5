//! Session encryptor: serialize, pad, MAC, encrypt, transport-encode.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use wafer_crypto::{CipherSuite, RandomSource};
use wafer_proto::{Envelope, SealedCookie, envelope::auth_bytes};

use crate::{error::SessionError, keys::ServerKeySet, settings::Settings};

/// Framing bytes the envelope adds around its segments: three `u32`
/// length prefixes.
const FRAMING_OVERHEAD: usize = 12;

/// The envelope payload: the session value plus its issue time.
///
/// The stamp lives inside the payload so the MAC covers it; an expiry
/// check can therefore trust it exactly as far as it trusts the payload
/// itself. Always written, only checked when
/// [`Settings::max_age`](crate::Settings::max_age) is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamped<T> {
    /// Unix seconds at seal time
    pub issued_at: u64,
    /// The session value
    pub value: T,
}

/// Current time as unix seconds. A clock before the epoch reads as zero.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}

/// Seal a session value into cookie text.
///
/// The random source is consumed: one source per seal operation, released
/// on every exit path. Padding is drawn so the encoded envelope is a whole
/// number of cipher blocks, required by CBC and kept for the stream-like
/// modes so ciphertext length never leaks sub-block payload size.
///
/// # Errors
///
/// - `Serialization` if the session value fails to serialize
/// - `PayloadTooLarge` if the serialized value exceeds
///   [`Envelope::MAX_SEGMENT`]; a larger payload would seal into a cookie
///   [`open_session`](crate::open_session) is guaranteed to reject
/// - `KeySetUnavailable` if the key set yields no key, or material the
///   configured suite cannot use
/// - `RandomnessExhausted` if the source's budget cannot cover the padding
///   and IV draws
pub fn seal_session<T: Serialize>(
    settings: &Settings,
    mut random: RandomSource,
    key_set: &dyn ServerKeySet,
    value: &T,
) -> Result<SealedCookie, SessionError> {
    let ring = key_set.keys()?;
    let suite = settings.suite();

    let stamped = Stamped { issued_at: unix_now(), value };
    let mut payload = Vec::new();
    ciborium::ser::into_writer(&stamped, &mut payload)
        .map_err(|_| SessionError::Serialization)?;

    // The decoder caps segments at MAX_SEGMENT; anything larger would mint
    // a cookie that can never be opened.
    if payload.len() > Envelope::MAX_SEGMENT {
        return Err(SessionError::PayloadTooLarge {
            len: payload.len(),
            max: Envelope::MAX_SEGMENT,
        });
    }

    let block = CipherSuite::BLOCK_SIZE;
    let unpadded = FRAMING_OVERHEAD + payload.len() + settings.hash().digest_len();
    let pad_len = (block - unpadded % block) % block;
    let padding = random.draw(pad_len)?;

    let mac = settings.hash().mac(ring.encryption.as_bytes(), &auth_bytes(&payload, &padding));
    let plaintext = Envelope::new(payload, padding, mac).encode();
    debug_assert_eq!(plaintext.len() % block, 0);

    let iv = random.draw(suite.iv_len())?;
    let ciphertext = suite.encrypt(ring.encryption.as_bytes(), &iv, &plaintext)?;

    tracing::trace!(cookie_bytes = iv.len() + ciphertext.len(), "sealed session cookie");
    Ok(SealedCookie::from_parts(&iv, &ciphertext))
}

//! The plaintext cookie record: payload, padding, MAC.
//!
//! Framing is a fixed sequence of big-endian `u32` length-prefixed
//! segments, self-delimiting so that a truncated or reshaped record is
//! distinguishable from a well-formed one:
//!
//! ```text
//! [payload_len: u32 BE][payload][padding_len: u32 BE][padding][mac_len: u32 BE][mac]
//! ```
//!
//! The MAC covers the first two segments exactly as framed (see
//! [`auth_bytes`]), never itself.

use wafer_crypto::MacDigest;

use crate::error::EnvelopeError;

/// Length of one segment prefix.
const PREFIX_LEN: usize = 4;

/// The structured record inside an encrypted session cookie.
///
/// Created transiently per seal/open call; it only ever leaves the process
/// in encrypted, transport-encoded form.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Serialized session payload
    pub payload: Vec<u8>,
    /// Random filler sized to block-align the encoded record
    pub padding: Vec<u8>,
    /// Keyed digest over the payload and padding segments
    pub mac: MacDigest,
}

/// The exact byte string the MAC covers: the length-prefixed framing of
/// `payload` and `padding`, excluding the MAC segment.
///
/// Length prefixes are covered too, so payload bytes cannot be reassigned
/// to padding (or vice versa) without breaking verification.
pub fn auth_bytes(payload: &[u8], padding: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * PREFIX_LEN + payload.len() + padding.len());
    put_segment(&mut out, payload);
    put_segment(&mut out, padding);
    out
}

impl Envelope {
    /// Largest segment accepted when parsing. Session cookies are bounded
    /// by browser cookie limits well below this; anything larger is a
    /// garbage or hostile record and is rejected before allocation.
    pub const MAX_SEGMENT: usize = 1 << 20;

    /// Assemble an envelope from its parts.
    pub fn new(payload: Vec<u8>, padding: Vec<u8>, mac: MacDigest) -> Self {
        Self { payload, padding, mac }
    }

    /// Bytes the MAC must cover for this envelope.
    pub fn auth_bytes(&self) -> Vec<u8> {
        auth_bytes(&self.payload, &self.padding)
    }

    /// Serialize to the wire framing.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = self.auth_bytes();
        put_segment(&mut out, self.mac.as_bytes());
        out
    }

    /// Parse the wire framing.
    ///
    /// # Errors
    ///
    /// - `Truncated` if the input ends inside a prefix or segment
    /// - `SegmentTooLarge` if a declared length exceeds [`Self::MAX_SEGMENT`]
    /// - `TrailingBytes` if input remains after the MAC segment
    pub fn decode(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let (payload, rest) = read_segment(bytes)?;
        let (padding, rest) = read_segment(rest)?;
        let (mac, rest) = read_segment(rest)?;

        if !rest.is_empty() {
            return Err(EnvelopeError::TrailingBytes { count: rest.len() });
        }

        Ok(Self {
            payload: payload.to_vec(),
            padding: padding.to_vec(),
            mac: MacDigest::from_bytes(mac.to_vec()),
        })
    }
}

fn put_segment(out: &mut Vec<u8>, segment: &[u8]) {
    // INVARIANT: Segments are bounded by cookie size limits (and MAX_SEGMENT
    // on the parse side), orders of magnitude below u32::MAX.
    #[allow(clippy::expect_used)]
    let len = u32::try_from(segment.len())
        .expect("invariant: envelope segment length fits in u32 (bounded by cookie size)");

    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(segment);
}

/// Read one length-prefixed segment, returning it and the remaining input.
fn read_segment(bytes: &[u8]) -> Result<(&[u8], &[u8]), EnvelopeError> {
    let Some(prefix) = bytes.get(..PREFIX_LEN) else {
        return Err(EnvelopeError::Truncated { expected: PREFIX_LEN, actual: bytes.len() });
    };

    // INVARIANT: The slice above is exactly PREFIX_LEN bytes.
    #[allow(clippy::expect_used)]
    let len = u32::from_be_bytes(prefix.try_into().expect("invariant: prefix is 4 bytes")) as usize;

    if len > Envelope::MAX_SEGMENT {
        return Err(EnvelopeError::SegmentTooLarge { len, max: Envelope::MAX_SEGMENT });
    }

    let body = &bytes[PREFIX_LEN..];
    if body.len() < len {
        return Err(EnvelopeError::Truncated { expected: len, actual: body.len() });
    }

    Ok((&body[..len], &body[len..]))
}

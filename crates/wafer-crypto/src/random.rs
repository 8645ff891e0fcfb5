//! Budgeted source of cryptographically secure bytes.
//!
//! One [`RandomSource`] feeds exactly one encrypt operation: it is moved
//! into the call, pays for IV and padding draws out of a fixed byte budget,
//! and is dropped on every exit path. The budget guards against unbounded
//! randomness consumption inside a single request.

use core::fmt;

use rand::{CryptoRng, RngCore, rngs::OsRng};

use crate::error::CryptoError;

/// Object-safe alias for a cryptographically secure RNG.
trait SecureRng: RngCore {}

impl<T: RngCore + CryptoRng> SecureRng for T {}

/// A scoped generator of cryptographically secure byte sequences.
pub struct RandomSource {
    rng: Box<dyn SecureRng>,
    remaining: usize,
}

impl RandomSource {
    /// Byte budget that comfortably covers one encrypt operation
    /// (one IV plus sub-block padding) with headroom.
    pub const DEFAULT_BUDGET: usize = 256;

    /// Source backed by the operating system RNG.
    pub fn os(budget: usize) -> Self {
        Self { rng: Box::new(OsRng), remaining: budget }
    }

    /// Source backed by a caller-supplied RNG.
    ///
    /// Intended for deterministic tests with a seeded generator; the
    /// `CryptoRng` bound keeps non-cryptographic RNGs out of production
    /// call sites too.
    pub fn from_rng<R>(rng: R, budget: usize) -> Self
    where
        R: RngCore + CryptoRng + 'static,
    {
        Self { rng: Box::new(rng), remaining: budget }
    }

    /// Bytes left in the budget.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Draw `n` unpredictable bytes, debiting the budget.
    ///
    /// # Errors
    ///
    /// `RandomnessExhausted` if `n` exceeds the remaining budget. The draw
    /// is not retried and the budget is left untouched.
    pub fn draw(&mut self, n: usize) -> Result<Vec<u8>, CryptoError> {
        if n > self.remaining {
            return Err(CryptoError::RandomnessExhausted {
                requested: n,
                remaining: self.remaining,
            });
        }

        let mut buf = vec![0u8; n];
        self.rng.fill_bytes(&mut buf);
        self.remaining -= n;

        Ok(buf)
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}

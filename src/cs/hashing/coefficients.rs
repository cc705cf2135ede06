//! # Coefficient Source
//!
//! Uniform sampling of the random coefficients that pick one member out of a hash family
//! (the polynomial multiplier, or the `a`/`b` pair of a universal hash).
//!
//! Generators draw from a single **process-wide** source that is seeded from OS entropy the
//! first time it is used and is never reseeded afterwards. Reseeding on every generator call
//! from a clock would hand out identical coefficients to generators created within the same
//! clock tick. Access to the process-wide source is serialized behind a mutex so concurrent
//! generator construction never observes the same state twice.
//!
//! Callers that need reproducible coefficients (tests, benchmarks) build their own
//! [`CoefficientSource`] from a fixed seed and pass it to the builders instead.
//!
//! ```rust
//! use unihash::cs::hashing::coefficients::CoefficientSource;
//!
//! let mut source = CoefficientSource::from_seed(7);
//! let a = source.sample_in_range(1, 100).unwrap();
//! assert!((1..=100).contains(&a));
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Result};

/// A source of uniformly distributed coefficients backed by any `rand::Rng`.
pub struct CoefficientSource<R = ChaCha20Rng> {
    rng: R,
}

impl CoefficientSource<ChaCha20Rng> {
    /// Creates a source seeded from the operating system's entropy pool.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy())
    }

    /// Creates a deterministic source. Two sources with the same seed yield the same sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> CoefficientSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns a value drawn uniformly from `[low, high]` (both ends inclusive).
    ///
    /// Fails with [`Error::InvalidParameter`] when the range is empty (`low > high`).
    pub fn sample_in_range(&mut self, low: u64, high: u64) -> Result<u64> {
        if low > high {
            return Err(Error::invalid(
                "low",
                format!("lower bound {low} exceeds upper bound {high}"),
            ));
        }
        Ok(self.rng.gen_range(low..=high))
    }
}

static PROCESS_SOURCE: OnceLock<Mutex<CoefficientSource>> = OnceLock::new();

/// Runs `f` with exclusive access to the process-wide source, seeding it on first use.
pub fn with_process_source<T>(f: impl FnOnce(&mut CoefficientSource) -> T) -> T {
    let source = PROCESS_SOURCE.get_or_init(|| {
        debug!("seeding process-wide coefficient source from OS entropy");
        Mutex::new(CoefficientSource::from_entropy())
    });
    // Sampling never leaves the rng half-updated, so a poisoned lock is still usable.
    let mut guard = source.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Draws one value uniformly from `[low, high]` using the process-wide source.
pub fn sample_in_range(low: u64, high: u64) -> Result<u64> {
    with_process_source(|source| source.sample_in_range(low, high))
}

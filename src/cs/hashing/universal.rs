//! # Universal Hashing
//!
//! A Carter-Wegman universal hash family over `u64` keys:
//!
//! ```text
//!   h_{a,b}(key) = ((a * key + b) mod p) mod M,    1 <= a <= p - 1,  0 <= b <= p - 1
//! ```
//!
//! When `a` and `b` are drawn at random, any two fixed distinct keys collide with probability
//! at most `1/M` over the choice of `(a, b)`. `p` must be prime and much larger than `M`.
//!
//! Here `p = 2^digs - 1` is a **Mersenne prime**, which lets the `mod p` step be done without a
//! division: writing `t = q * 2^digs + r`, and since `2^digs ≡ 1 (mod p)`,
//!
//! ```text
//!   t ≡ q + r = (t >> digs) + (t & p)   (mod p)
//! ```
//!
//! For `digs >= 32` one fold leaves a value below `2p`, so a single conditional subtraction of `p`
//! finishes the reduction. Narrower primes may need more than one fold first; [`hash`] folds until
//! the value fits in `digs` bits, which gives the same result whenever one fold already suffices.
//!
//! The product `a * key + b` is computed with wrapping 64-bit arithmetic. Neither primality of
//! `p` nor that `digs` is a Mersenne exponent is verified; both are caller contracts.
//!
//! **Note**: This is not a cryptographic hash.
//!
//! # Usage
//!
//! ```rust
//! use unihash::cs::hashing::universal::{make_universal_hash_generator, UniversalHashBuilder};
//!
//! // Random (a, b), p = 2^61 - 1, outputs in [0, 2^50).
//! let uhf = make_universal_hash_generator(61, 1 << 50).unwrap();
//! assert_eq!(uhf(12345), uhf(12345));
//!
//! // Fixed seed for reproducible parameters.
//! let hasher = UniversalHashBuilder::new(61, 1 << 50).seed(42).build().unwrap();
//! assert!(hasher.hash(12345) < 1 << 50);
//! ```

use log::{debug, warn};
use rand::Rng;

use super::coefficients::{with_process_source, CoefficientSource};
use crate::error::{Error, Result};

/// Default Mersenne exponent: `p = 2^61 - 1`.
pub const DEFAULT_DIGS: u32 = 61;

/// Exponents `e <= 63` for which `2^e - 1` is prime.
pub const MERSENNE_EXPONENTS: [u32; 9] = [2, 3, 5, 7, 13, 17, 19, 31, 61];

/// Universal hash of `key` with `p = 2^digs - 1`, returning a value in `[0, m)`.
///
/// Requires `1 <= digs <= 63`, `a != 0` and `m != 0`; anything else is
/// [`Error::InvalidParameter`]. `a` and `b` should lie in `[1, p - 1]` and `[0, p - 1]`.
pub fn hash(key: u64, a: u64, b: u64, digs: u32, m: u64) -> Result<u64> {
    let p = mersenne_modulus(digs)?;
    if a == 0 {
        return Err(Error::invalid("a", "must be in [1, p - 1]"));
    }
    check_range(m)?;
    Ok(mersenne_reduce(a.wrapping_mul(key).wrapping_add(b), digs, p) % m)
}

/// Universal hash for an arbitrary prime `p`, reduced with a hardware division.
///
/// `((a * key + b) mod p) mod m`, with the inner product wrapping at 64 bits. Agrees with
/// [`hash`] when `p = 2^digs - 1`.
pub fn simple_hash(key: u64, a: u64, b: u64, p: u64, m: u64) -> Result<u64> {
    if p == 0 {
        return Err(Error::invalid("p", "modulus must be non-zero"));
    }
    check_range(m)?;
    Ok((a.wrapping_mul(key).wrapping_add(b) % p) % m)
}

/// Returns a universal hash function with `a`, `b` drawn from the process-wide source.
///
/// Every call samples a new, independent `(a, b)` pair.
pub fn make_universal_hash_generator(
    digs: u32,
    m: u64,
) -> Result<impl Fn(u64) -> u64 + Copy + Send + Sync> {
    let hasher = UniversalHashBuilder::new(digs, m).build()?;
    Ok(move |key: u64| hasher.hash(key))
}

/// Returns `2^digs - 1`, rejecting widths where the shift or mask is ill-defined.
pub fn mersenne_modulus(digs: u32) -> Result<u64> {
    if !(1..=63).contains(&digs) {
        return Err(Error::invalid("digs", format!("{digs} is outside [1, 63]")));
    }
    Ok((1u64 << digs) - 1)
}

fn check_range(m: u64) -> Result<()> {
    if m == 0 {
        return Err(Error::invalid("m", "output range must be non-zero"));
    }
    Ok(())
}

/// A builder for [`UniversalHash`]: output range, prime width, and either a seed or explicit `(a, b)`.
#[derive(Debug, Clone)]
pub struct UniversalHashBuilder {
    digs: u32,
    m: u64,
    seed: Option<u64>,
    a: Option<u64>,
    b: Option<u64>,
}

impl Default for UniversalHashBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DIGS, 1 << 32)
    }
}

impl UniversalHashBuilder {
    /// Creates a builder for `p = 2^digs - 1` and outputs in `[0, m)`.
    pub fn new(digs: u32, m: u64) -> Self {
        Self {
            digs,
            m,
            seed: None,
            a: None,
            b: None,
        }
    }

    /// Samples `(a, b)` from a source seeded with `seed` instead of the process-wide one.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Provide your own parameters `a` and `b`, bypassing random generation.
    /// Must be in `[1, p - 1]` for `a`, `[0, p - 1]` for `b`.
    pub fn params(mut self, a: u64, b: u64) -> Self {
        self.a = Some(a);
        self.b = Some(b);
        self
    }

    /// Builds the hash function.
    pub fn build(self) -> Result<UniversalHash> {
        if self.a.is_some() || self.seed.is_some() {
            let mut source = CoefficientSource::from_seed(self.seed.unwrap_or_default());
            return self.build_with(&mut source);
        }
        with_process_source(|source| self.build_with(source))
    }

    /// Builds the hash function, drawing `(a, b)` (if not fixed) from `source`.
    pub fn build_with<R: Rng>(self, source: &mut CoefficientSource<R>) -> Result<UniversalHash> {
        let digs = self.digs;
        let p = mersenne_modulus(digs)?;
        if p < 2 {
            return Err(Error::invalid("digs", "2^1 - 1 leaves no a in [1, p - 1]"));
        }
        check_range(self.m)?;
        if !MERSENNE_EXPONENTS.contains(&digs) {
            warn!("2^{digs} - 1 is not a Mersenne prime; collision bounds do not hold");
        }
        if self.m > p {
            warn!("output range {} exceeds p = {p}; distribution will be skewed", self.m);
        }

        let (a, b) = match (self.a, self.b) {
            (Some(a), Some(b)) => {
                if a == 0 || a >= p {
                    return Err(Error::invalid("a", format!("{a} is outside [1, {}]", p - 1)));
                }
                if b >= p {
                    return Err(Error::invalid("b", format!("{b} is outside [0, {}]", p - 1)));
                }
                (a, b)
            }
            _ => (
                source.sample_in_range(1, p - 1)?,
                source.sample_in_range(0, p - 1)?,
            ),
        };
        debug!("universal hash: p = 2^{digs} - 1, m = {}, a = {a}, b = {b}", self.m);

        Ok(UniversalHash {
            a,
            b,
            digs,
            p,
            m: self.m,
        })
    }
}

/// A member of the universal family with `(a, b)` fixed. Immutable and cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalHash {
    a: u64,
    b: u64,
    digs: u32,
    p: u64,
    m: u64,
}

impl UniversalHash {
    /// Hashes `key` into `[0, m)`.
    #[inline]
    pub fn hash(&self, key: u64) -> u64 {
        let t = self.a.wrapping_mul(key).wrapping_add(self.b);
        mersenne_reduce(t, self.digs, self.p) % self.m
    }

    pub fn a(&self) -> u64 {
        self.a
    }

    pub fn b(&self) -> u64 {
        self.b
    }

    pub fn digs(&self) -> u32 {
        self.digs
    }

    /// The Mersenne prime `2^digs - 1`.
    pub fn p(&self) -> u64 {
        self.p
    }

    /// Size of the output range.
    pub fn m(&self) -> u64 {
        self.m
    }
}

// ---------- Reduction mod p = 2^digs - 1 ---------- //

#[inline]
fn mersenne_reduce(t: u64, digs: u32, p: u64) -> u64 {
    let mut t = (t >> digs) + (t & p);
    while t >> digs != 0 {
        t = (t >> digs) + (t & p);
    }
    if t >= p {
        t - p
    } else {
        t
    }
}

//! # Polynomial String Hash
//!
//! Hashes a string by treating its characters as the coefficients of a polynomial and
//! evaluating that polynomial at `multiplier` with **Horner's rule**:
//!
//! ```text
//!   h = ((c_0 * x + c_1) * x + c_2) * x + ... + c_{n-1}      (x = multiplier)
//!   H(key) = h mod p
//! ```
//!
//! Every character takes part in the result, so the hash is sensitive to both the order and
//! the number of characters. The running value `h` is kept in a `u64` and is allowed to wrap
//! on overflow; only the final value is reduced mod `p`. This trades a little distribution
//! quality for a loop with no division in it.
//!
//! `p` must be prime (a Mersenne prime such as `2^61 - 1` is the usual choice) and the
//! multiplier must lie in `[1, p - 1]`. Primality is **not** checked.
//!
//! **Note**: This is not a cryptographic hash.
//!
//! ## Usage
//!
//! ```rust
//! use unihash::cs::hashing::polynomial::{hash, make_hash_generator, MERSENNE_61};
//!
//! // Fixed parameters.
//! let h = hash("hello", MERSENNE_61, 37).unwrap();
//! assert_eq!(h, hash("hello", MERSENNE_61, 37).unwrap());
//!
//! // Random multiplier, fixed once per generator call.
//! let hf = make_hash_generator(MERSENNE_61).unwrap();
//! assert_eq!(hf("hello"), hf("hello"));
//! ```

use log::debug;
use rand::Rng;

use super::coefficients::{with_process_source, CoefficientSource};
use crate::error::{Error, Result};

/// The Mersenne prime `2^61 - 1`.
pub const MERSENNE_61: u64 = (1 << 61) - 1;

/// Hashes `key` with the given prime modulus `p` and `multiplier`, returning a value in `[0, p)`.
///
/// Fails with [`Error::InvalidParameter`] if `p` or `multiplier` is zero.
pub fn hash(key: &str, p: u64, multiplier: u64) -> Result<u64> {
    if p == 0 {
        return Err(Error::invalid("p", "modulus must be non-zero"));
    }
    if multiplier == 0 {
        return Err(Error::invalid("multiplier", "must be in [1, p - 1]"));
    }
    Ok(horner(key, multiplier) % p)
}

/// Returns a hash function over strings with a multiplier drawn uniformly from `[1, p - 1]`.
///
/// Each call samples a fresh multiplier from the process-wide coefficient source.
pub fn make_hash_generator(p: u64) -> Result<impl Fn(&str) -> u64 + Copy + Send + Sync> {
    let hasher = PolyHashBuilder::new(p).build()?;
    Ok(move |key: &str| hasher.hash(key))
}

#[inline]
fn horner(key: &str, multiplier: u64) -> u64 {
    key.chars()
        .fold(0u64, |h, c| multiplier.wrapping_mul(h).wrapping_add(c as u64))
}

/// A builder for [`PolynomialHash`], allowing you to fix the multiplier or the seed it is drawn with.
#[derive(Debug, Clone)]
pub struct PolyHashBuilder {
    modulus: u64,
    multiplier: Option<u64>,
    seed: Option<u64>,
}

impl Default for PolyHashBuilder {
    fn default() -> Self {
        Self::new(MERSENNE_61)
    }
}

impl PolyHashBuilder {
    /// Creates a builder for the prime modulus `p`. The multiplier is random unless set.
    pub fn new(p: u64) -> Self {
        Self {
            modulus: p,
            multiplier: None,
            seed: None,
        }
    }

    /// Uses `multiplier` instead of sampling one. Must be in `[1, p - 1]`.
    pub fn multiplier(mut self, multiplier: u64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// Samples the multiplier from a source seeded with `seed` instead of the process-wide one.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the hash function.
    pub fn build(self) -> Result<PolynomialHash> {
        // a fixed multiplier needs no sampling, so it never touches the shared source
        if self.multiplier.is_some() || self.seed.is_some() {
            let mut source = CoefficientSource::from_seed(self.seed.unwrap_or_default());
            return self.build_with(&mut source);
        }
        with_process_source(|source| self.build_with(source))
    }

    /// Builds the hash function, drawing the multiplier (if not fixed) from `source`.
    pub fn build_with<R: Rng>(self, source: &mut CoefficientSource<R>) -> Result<PolynomialHash> {
        let p = self.modulus;
        if p < 2 {
            return Err(Error::invalid(
                "p",
                format!("modulus {p} leaves no multiplier in [1, p - 1]"),
            ));
        }
        let multiplier = match self.multiplier {
            Some(m) if m == 0 || m >= p => {
                return Err(Error::invalid(
                    "multiplier",
                    format!("{m} is outside [1, {}]", p - 1),
                ));
            }
            Some(m) => m,
            None => source.sample_in_range(1, p - 1)?,
        };
        debug!("polynomial hash: p = {p}, multiplier = {multiplier}");
        Ok(PolynomialHash {
            modulus: p,
            multiplier,
        })
    }
}

/// A polynomial string hash with its multiplier fixed. Immutable and cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialHash {
    modulus: u64,
    multiplier: u64,
}

impl PolynomialHash {
    /// Hashes `key` into `[0, p)`.
    #[inline]
    pub fn hash(&self, key: &str) -> u64 {
        horner(key, self.multiplier) % self.modulus
    }

    pub fn p(&self) -> u64 {
        self.modulus
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    #[test]
    fn test_fixed_parameters_stable() {
        let h1 = hash(KEY, MERSENNE_61, 37).unwrap();
        let h2 = hash(KEY, MERSENNE_61, 37).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1, 477_582_210_036_943_153);
    }

    #[test]
    fn test_horner_small() {
        // 97 * 37^2 + 98 * 37 + 99 = 136518
        assert_eq!(hash("abc", u64::MAX, 37).unwrap(), 136_518);
        assert_eq!(hash("abc", 101, 37).unwrap(), 67);
        assert_eq!(hash("", 101, 37).unwrap(), 0);
    }

    #[test]
    fn test_unicode_scalar_values() {
        assert_eq!(hash("é", 1000, 31).unwrap(), 233);
        assert_eq!(hash("€", MERSENNE_61, 31).unwrap(), 0x20AC);
    }

    #[test]
    fn test_long_key_wraps() {
        let key = "z".repeat(10_000);
        let h = hash(&key, MERSENNE_61, MERSENNE_61 - 1).unwrap();
        assert!(h < MERSENNE_61);
    }

    #[test]
    fn test_order_and_length_sensitive() {
        let h = |k| hash(k, MERSENNE_61, 131).unwrap();
        assert_ne!(h("abc"), h("cba"));
        assert_ne!(h("abc"), h("abcd"));
        assert_ne!(h("abc"), h("ab"));
    }

    #[test]
    fn test_range() {
        let p = 97;
        for i in 0..500 {
            let key = format!("key-{i}");
            assert!(hash(&key, p, 13).unwrap() < p);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            hash(KEY, MERSENNE_61, 0),
            Err(Error::InvalidParameter { name: "multiplier", .. })
        ));
        assert!(matches!(
            hash(KEY, 0, 37),
            Err(Error::InvalidParameter { name: "p", .. })
        ));
        assert!(make_hash_generator(1).is_err());
        assert!(PolyHashBuilder::new(101).multiplier(101).build().is_err());
        assert!(PolyHashBuilder::new(101).multiplier(0).build().is_err());
    }

    #[test]
    fn test_generator_deterministic() {
        let hf = make_hash_generator(MERSENNE_61).unwrap();
        let h1 = hf(KEY);
        let h2 = hf(KEY);
        assert_eq!(h1, h2);
        assert!(h1 < MERSENNE_61);
    }

    #[test]
    fn test_generator_matches_raw_hash() {
        let hasher = PolyHashBuilder::new(MERSENNE_61).seed(99).build().unwrap();
        assert!((1..MERSENNE_61).contains(&hasher.multiplier()));
        assert_eq!(
            hasher.hash(KEY),
            hash(KEY, MERSENNE_61, hasher.multiplier()).unwrap()
        );
    }

    #[test]
    fn test_generators_independent() {
        let a = PolyHashBuilder::new(MERSENNE_61).build().unwrap();
        let b = PolyHashBuilder::new(MERSENNE_61).build().unwrap();
        assert_ne!(a.multiplier(), b.multiplier());
        assert_ne!(a.hash(KEY), b.hash(KEY));
    }

    #[test]
    fn test_seeded_builders_reproducible() {
        let a = PolyHashBuilder::new(MERSENNE_61).seed(7).build().unwrap();
        let b = PolyHashBuilder::new(MERSENNE_61).seed(7).build().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_explicit_multiplier() {
        let hasher = PolyHashBuilder::new(MERSENNE_61).multiplier(37).build().unwrap();
        assert_eq!(hasher.hash(KEY), 477_582_210_036_943_153);
        assert_eq!(hasher.p(), MERSENNE_61);
    }
}

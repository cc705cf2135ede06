//! # Universal Hashing for Strings
//!
//! Strings are brought into a universal family in two steps:
//!
//! 1. A [`PolynomialHash`] with a random multiplier over a prime `p` (larger than `M` and than
//!    any character code) reduces the string to an intermediate value in `[0, p - 1]`.
//! 2. A [`UniversalHash`] over the same Mersenne prime maps that value into `[0, M - 1]`.
//!
//! ```rust
//! use unihash::cs::hashing::universal_string::UniversalStringHash;
//!
//! let hasher = UniversalStringHash::new(61, 1 << 50).unwrap();
//! let h = hasher.hash("hello");
//! assert!(h < 1 << 50);
//! assert_eq!(h, hasher.hash("hello"));
//! ```

use super::polynomial::{PolyHashBuilder, PolynomialHash};
use super::universal::{mersenne_modulus, UniversalHash, UniversalHashBuilder};
use crate::error::{Error, Result};

/// A string hash into `[0, M)` built from a polynomial hash followed by a universal hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalStringHash {
    intermediate: PolynomialHash,
    finish: UniversalHash,
}

impl UniversalStringHash {
    /// Samples both stages from the process-wide source, using `p = 2^digs - 1` for each.
    pub fn new(digs: u32, m: u64) -> Result<Self> {
        let p = mersenne_modulus(digs)?;
        let intermediate = PolyHashBuilder::new(p).build()?;
        let finish = UniversalHashBuilder::new(digs, m).build()?;
        Ok(Self {
            intermediate,
            finish,
        })
    }

    /// Combines two existing hash functions. The intermediate range must fit the universal
    /// stage's prime.
    pub fn from_parts(intermediate: PolynomialHash, finish: UniversalHash) -> Result<Self> {
        if intermediate.p() > finish.p() {
            return Err(Error::invalid(
                "intermediate",
                format!(
                    "polynomial modulus {} exceeds universal prime {}",
                    intermediate.p(),
                    finish.p()
                ),
            ));
        }
        Ok(Self {
            intermediate,
            finish,
        })
    }

    /// Hashes `key` into `[0, M)`.
    #[inline]
    pub fn hash(&self, key: &str) -> u64 {
        self.finish.hash(self.intermediate.hash(key))
    }

    pub fn intermediate(&self) -> &PolynomialHash {
        &self.intermediate
    }

    pub fn universal(&self) -> &UniversalHash {
        &self.finish
    }
}

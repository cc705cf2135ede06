pub mod coefficients;
pub mod polynomial;
pub mod universal;
pub mod universal_string;

pub use coefficients::{sample_in_range, CoefficientSource};
pub use polynomial::{make_hash_generator, PolyHashBuilder, PolynomialHash, MERSENNE_61};
pub use universal::{
    make_universal_hash_generator, UniversalHash, UniversalHashBuilder, DEFAULT_DIGS,
    MERSENNE_EXPONENTS,
};
pub use universal_string::UniversalStringHash;

//! Error type shared by every hash family in the crate.

use thiserror::Error;

/// Errors raised when a hash function or generator is given malformed parameters.
///
/// Primality of the modulus is never checked; only parameters that make the arithmetic
/// itself ill-defined are rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

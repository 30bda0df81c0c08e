use core::fmt;

/// Result type alias for table construction.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced while preparing NTT parameters.
///
/// Construction is all-or-nothing: on error no table value exists. The
/// transform passes themselves are total over their preconditions and
/// never return an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested log2 of the polynomial degree is outside the range
    /// [`crate::LOG_N_MIN`] ..= [`crate::LOG_N_MAX`].
    InvalidDegree,
    /// The modulus is not a prime with q = 1 (mod 2n) below 2^62, or a
    /// required inverse does not exist.
    UnsuitableModulus,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDegree => write!(f, "polynomial degree out of supported range"),
            Error::UnsuitableModulus => {
                write!(f, "modulus does not support a negacyclic NTT of this degree")
            }
        }
    }
}

impl std::error::Error for Error {}

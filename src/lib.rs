pub mod dft;
pub mod error;
pub mod modulus;

/// Smallest supported polynomial degree: n = 2.
pub const LOG_N_MIN: usize = 1;

/// Largest supported polynomial degree: n = 131072.
pub const LOG_N_MAX: usize = 17;

/// Moduli must satisfy q < 2^62 so that values in [0, 4q) fit in a u64.
pub const MAX_MODULUS_BITS: usize = 62;

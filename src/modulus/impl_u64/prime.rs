use crate::error::{Error, Result};
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::prime::Prime;
use crate::modulus::shoup::ShoupPrecomp;
use crate::modulus::BARRETT;
use crate::MAX_MODULUS_BITS;
use primality_test::IsPrime;
use prime_factorization::Factorization;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64> for a prime 1 < q < 2^62,
    /// with the distinct prime factors of q-1 precomputed.
    pub fn new(q: u64) -> Result<Self> {
        if q <= 1 || q >> MAX_MODULUS_BITS != 0 || !q.is_prime() {
            return Err(Error::UnsuitableModulus);
        }

        let factors: Vec<u64> = Factorization::run(q - 1)
            .prime_factor_repr()
            .iter()
            .map(|factor| factor.0)
            .collect();

        Ok(Self {
            q: q,
            factors: factors,
            barrett: BarrettPrecomp::new(q),
            shoup: ShoupPrecomp::new(q),
        })
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns a * b mod q.
    #[inline(always)]
    pub fn mul_mod(&self, a: u64, b: u64) -> u64 {
        self.barrett.reduce_u128(a as u128 * b as u128)
    }

    /// Returns x * 2^-1 mod q for x in [0, q).
    #[inline(always)]
    pub fn div2_mod(&self, x: u64) -> u64 {
        debug_assert!(x < self.q, "invalid argument: x = {} >= q = {}", x, self.q);
        if x & 1 == 0 {
            x >> 1
        } else {
            (x + self.q) >> 1
        }
    }

    /// Returns x^exponent mod q.
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let mut y: u64 = 1;
        let mut x_pow: u64 = self.barrett.reduce::<BARRETT>(&x);
        let mut e: u64 = exponent;
        while e > 0 {
            if e & 1 == 1 {
                y = self.mul_mod(y, x_pow);
            }
            x_pow = self.mul_mod(x_pow, x_pow);
            e >>= 1;
        }
        y
    }

    /// Returns x^-1 mod q, or None if x = 0 mod q.
    pub fn inv(&self, x: u64) -> Option<u64> {
        let x: u64 = self.barrett.reduce::<BARRETT>(&x);
        if x == 0 {
            return None;
        }
        let x_inv: u64 = self.pow(x, self.q - 2);
        debug_assert!(self.mul_mod(x, x_inv) == 1);
        Some(x_inv)
    }

    /// Returns the smallest generator of the multiplicative group of Z_q.
    fn primitive_root(&self) -> u64 {
        let mut candidate: u64 = 1;
        'candidates: loop {
            candidate += 1;
            for &factor in &self.factors {
                if self.pow(candidate, (self.q - 1) / factor) == 1 {
                    continue 'candidates;
                }
            }
            return candidate;
        }
    }

    /// Returns a primitive nth_root-th root of unity mod q, or None if
    /// nth_root does not divide q-1.
    fn primitive_nth_root(&self, nth_root: u64) -> Option<u64> {
        debug_assert!(
            nth_root & (nth_root - 1) == 0,
            "invalid argument: nth_root = {} is not a power of two",
            nth_root
        );
        if nth_root < 2 || (self.q - 1) % nth_root != 0 {
            return None;
        }

        let psi: u64 = self.pow(self.primitive_root(), (self.q - 1) / nth_root);

        // A generator projected down has order exactly nth_root:
        // psi^(nth_root/2) = -1 mod q.
        if self.pow(psi, nth_root >> 1) != self.q - 1 {
            return None;
        }

        Some(psi)
    }

    /// Returns the minimal primitive nth_root-th root of unity mod q, or
    /// None if none exists. The primitive roots are exactly the odd powers
    /// of any one of them, so the search multiplies by psi^2 and keeps the
    /// smallest value seen.
    pub fn minimal_primitive_nth_root(&self, nth_root: u64) -> Option<u64> {
        let psi: u64 = self.primitive_nth_root(nth_root)?;
        let psi_sq: u64 = self.mul_mod(psi, psi);
        let mut current: u64 = psi;
        let mut minimal: u64 = psi;
        for _ in 0..(nth_root >> 1) {
            if current < minimal {
                minimal = current;
            }
            current = self.mul_mod(current, psi_sq);
        }
        Some(minimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_primitive_nth_root() {
        let prime: Prime<u64> = Prime::<u64>::new(17).unwrap();
        // The primitive 4th roots of unity mod 17 are 4 and 13.
        assert_eq!(prime.minimal_primitive_nth_root(4), Some(4));

        let prime: Prime<u64> = Prime::<u64>::new(97).unwrap();
        let psi: u64 = prime.minimal_primitive_nth_root(8).unwrap();
        assert_eq!(prime.pow(psi, 4), 96);
        for k in 1..8 {
            if k != 4 {
                assert_ne!(prime.pow(psi, k), 96, "psi^{} = -1", k);
            }
        }
        // Minimality: no smaller element has order exactly 8.
        for candidate in 1..psi {
            assert!(
                prime.pow(candidate, 8) != 1 || prime.pow(candidate, 4) != 96,
                "candidate {} is a smaller primitive 8th root",
                candidate
            );
        }
    }

    #[test]
    fn test_unsuitable_modulus() {
        assert_eq!(Prime::<u64>::new(15).unwrap_err(), Error::UnsuitableModulus);
        assert_eq!(Prime::<u64>::new(1).unwrap_err(), Error::UnsuitableModulus);
        assert_eq!(
            Prime::<u64>::new(1 << 62).unwrap_err(),
            Error::UnsuitableModulus
        );
    }

    #[test]
    fn test_no_nth_root() {
        // 13 - 1 = 12 is not divisible by 8.
        let prime: Prime<u64> = Prime::<u64>::new(13).unwrap();
        assert_eq!(prime.minimal_primitive_nth_root(8), None);
    }

    #[test]
    fn test_inv() {
        let prime: Prime<u64> = Prime::<u64>::new(0x1fffffffffe00001).unwrap();
        assert_eq!(prime.inv(0), None);
        let x: u64 = 0x123456789abcdef;
        let x_inv: u64 = prime.inv(x).unwrap();
        assert_eq!(prime.mul_mod(x, x_inv), 1);
    }
}

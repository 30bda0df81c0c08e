use crate::modulus::shoup::{Shoup, ShoupPrecomp};
use crate::modulus::ReduceOnce;

impl ShoupPrecomp<u64> {
    pub fn new(q: u64) -> Self {
        Self { q }
    }

    /// Returns v paired with its pre-multiplier floor(v * 2^64 / q).
    #[inline(always)]
    pub fn prepare(&self, v: u64) -> Shoup<u64> {
        debug_assert!(v < self.q, "invalid argument: v = {} >= q = {}", v, self.q);
        let quotient: u64 = (((v as u128) << 64) / self.q as u128) as _;
        Shoup(v, quotient)
    }

    /// Returns lhs * rhs mod q.
    #[inline(always)]
    pub fn mul_external(&self, lhs: Shoup<u64>, rhs: u64) -> u64 {
        let mut r: u64 = self.mul_external_lazy(lhs, rhs);
        r.reduce_once_assign(self.q);
        r
    }

    /// Assigns lhs * rhs mod q to rhs.
    #[inline(always)]
    pub fn mul_external_assign(&self, lhs: Shoup<u64>, rhs: &mut u64) {
        self.mul_external_lazy_assign(lhs, rhs);
        rhs.reduce_once_assign(self.q);
    }

    /// Returns lhs * rhs mod q in the range [0, 2q).
    #[inline(always)]
    pub fn mul_external_lazy(&self, lhs: Shoup<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_lazy_assign(lhs, &mut r);
        r
    }

    /// Assigns lhs * rhs mod q to rhs, leaving it in the range [0, 2q).
    #[inline(always)]
    pub fn mul_external_lazy_assign(&self, lhs: Shoup<u64>, rhs: &mut u64) {
        let t: u64 = ((*lhs.quotient() as u128 * *rhs as u128) >> 64) as _;
        *rhs = (rhs.wrapping_mul(*lhs.value())).wrapping_sub(self.q.wrapping_mul(t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_external() {
        let q: u64 = 0x1fffffffffe00001;
        let shoup: ShoupPrecomp<u64> = ShoupPrecomp::new(q);

        let w: Shoup<u64> = shoup.prepare(q - 2);
        for rhs in [0u64, 1, q - 1, q, 2 * q - 1, u64::MAX] {
            let want: u64 = (((q - 2) as u128 * rhs as u128) % q as u128) as u64;
            assert_eq!(shoup.mul_external(w, rhs), want);
            let lazy: u64 = shoup.mul_external_lazy(w, rhs);
            assert!(lazy < 2 * q);
            assert_eq!(lazy % q, want);
            let mut r: u64 = rhs;
            shoup.mul_external_assign(w, &mut r);
            assert_eq!(r, want);
        }
    }
}

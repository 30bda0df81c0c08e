use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::{BARRETT, BARRETTLAZY, FOURTIMES, NONE, ONCE, REDUCEMOD, TWICE};

use num_bigint::BigUint;
use num_traits::cast::ToPrimitive;

impl BarrettPrecomp<u64> {
    pub fn new(q: u64) -> BarrettPrecomp<u64> {
        let big_r: BigUint =
            (BigUint::from(1 as usize) << ((u64::BITS << 1) as usize)) / BigUint::from(q);
        let lo: u64 = (&big_r & BigUint::from(u64::MAX)).to_u64().unwrap();
        let hi: u64 = (big_r >> u64::BITS).to_u64().unwrap();
        Self {
            q: q,
            two_q: q << 1,
            four_q: q << 2,
            lo: lo,
            hi: hi,
        }
    }

    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        match REDUCE {
            NONE => {}
            ONCE => x.reduce_once_assign(self.q),
            TWICE => x.reduce_once_assign(self.two_q),
            FOURTIMES => x.reduce_once_assign(self.four_q),
            BARRETT => {
                let mhi: u64 = x.mul_hi(self.hi);
                *x = x.wrapping_sub(mhi.wrapping_mul(self.q));
                x.reduce_once_assign(self.q);
            }
            BARRETTLAZY => {
                let mhi: u64 = x.mul_hi(self.hi);
                *x = x.wrapping_sub(mhi.wrapping_mul(self.q));
            }
            _ => unreachable!("invalid REDUCE argument"),
        }
    }

    #[inline(always)]
    pub fn reduce<const REDUCE: REDUCEMOD>(&self, x: &u64) -> u64 {
        let mut r = *x;
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    /// Reduces a full 128-bit value modulo q using the precomputed
    /// floor(2^128 / q), leaving the result in [0, 2q).
    #[inline(always)]
    pub fn reduce_u128_lazy(&self, x: u128) -> u64 {
        let x_lo: u64 = x as u64;
        let x_hi: u64 = (x >> 64) as u64;

        // Top two words of (x_lo + x_hi * 2^64) * (lo + hi * 2^64) / 2^64.
        let carry: u64 = x_lo.mul_hi(self.lo);
        let (mid, c0) = x_lo.wrapping_mul(self.hi).overflowing_add(carry);
        let tmp: u64 = x_lo.mul_hi(self.hi).wrapping_add(c0 as u64);
        let (_, c1) = mid.overflowing_add(x_hi.wrapping_mul(self.lo));
        let carry: u64 = x_hi.mul_hi(self.lo).wrapping_add(c1 as u64);

        let quotient: u64 = x_hi
            .wrapping_mul(self.hi)
            .wrapping_add(tmp)
            .wrapping_add(carry);

        x_lo.wrapping_sub(quotient.wrapping_mul(self.q))
    }

    /// Reduces a full 128-bit value modulo q into [0, q).
    #[inline(always)]
    pub fn reduce_u128(&self, x: u128) -> u64 {
        self.reduce_u128_lazy(x).reduce_once(self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce() {
        let q: u64 = 0x1fffffffffe00001;
        let barrett: BarrettPrecomp<u64> = BarrettPrecomp::new(q);

        let x: u64 = u64::MAX - 12345;
        assert_eq!(barrett.reduce::<BARRETT>(&x), x % q);
        assert_eq!(barrett.reduce::<ONCE>(&(q + 3)), 3);
        assert_eq!(barrett.reduce::<TWICE>(&(2 * q + 3)), 3);
        assert_eq!(barrett.reduce::<FOURTIMES>(&(4 * q + 3)), 3);
        assert_eq!(barrett.reduce::<NONE>(&x), x);
    }

    #[test]
    fn test_reduce_u128() {
        let q: u64 = 0x1fffffffffe00001;
        let barrett: BarrettPrecomp<u64> = BarrettPrecomp::new(q);

        for x in [
            0u128,
            1u128,
            q as u128 - 1,
            q as u128 * q as u128,
            (q as u128 - 1) * (q as u128 - 1),
            u128::MAX,
        ] {
            assert_eq!(barrett.reduce_u128(x) as u128, x % q as u128);
        }
    }
}

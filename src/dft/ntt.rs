use crate::dft::DFT;
use crate::error::{Error, Result};
use crate::modulus::prime::Prime;
use crate::modulus::shoup::Shoup;
use crate::modulus::{ReduceOnce, WordOps, BARRETT};
use crate::{LOG_N_MAX, LOG_N_MIN};
use itertools::izip;

/// Precomputed root-power tables for the negacyclic NTT over
/// Z_q[x]/(x^n + 1), n = 2^log_n, q prime with q = 1 (mod 2n).
///
/// All tables are Shoup pairs (value, floor(value * 2^64 / q)) so that the
/// butterfly inner loops run on 64-bit multiplies only. A table is built
/// once by [`Table::new`] and is read-only afterwards; any number of
/// transform passes may share it concurrently.
pub struct Table<O> {
    prime: Prime<O>,
    coeff_count_power: usize,
    coeff_count: usize,
    /// minimal primitive 2n-th root of unity mod q
    psi: O,
    /// psi^i at index bitrev(i)
    psi_forward_rev: Vec<Shoup<O>>,
    /// powers of psi^-1, rewritten so the backward pass reads slots
    /// 1..n sequentially across its stages; slot 0 is unused
    psi_backward_seq: Vec<Shoup<O>>,
    /// psi^-i * 2^-1 mod q at index bitrev(i); not rewritten
    psi_backward_div_two_rev: Vec<Shoup<O>>,
    /// n^-1 mod q
    n_inv: O,
    q: O,
    two_q: O,
    four_q: O,
}

impl Table<u64> {
    /// Builds the tables for n = 2^coeff_count_power and the given modulus.
    ///
    /// Fails with [`Error::InvalidDegree`] if coeff_count_power is outside
    /// [LOG_N_MIN, LOG_N_MAX], and with [`Error::UnsuitableModulus`] if q
    /// is not a prime below 2^62 admitting a primitive 2n-th root of unity.
    /// On failure nothing is allocated.
    pub fn new(coeff_count_power: usize, q: u64) -> Result<Table<u64>> {
        if !(LOG_N_MIN..=LOG_N_MAX).contains(&coeff_count_power) {
            return Err(Error::InvalidDegree);
        }

        let prime: Prime<u64> = Prime::<u64>::new(q)?;
        let n: usize = 1 << coeff_count_power;
        let nth_root: u64 = (n as u64) << 1;

        let psi: u64 = prime
            .minimal_primitive_nth_root(nth_root)
            .ok_or(Error::UnsuitableModulus)?;
        let psi_inv: u64 = prime.inv(psi).ok_or(Error::UnsuitableModulus)?;
        let n_inv: u64 = prime.inv(n as u64).ok_or(Error::UnsuitableModulus)?;

        let psi_forward_rev: Vec<Shoup<u64>> = Self::powers_rev(&prime, psi, coeff_count_power);
        let psi_backward_rev: Vec<Shoup<u64>> = Self::powers_rev(&prime, psi_inv, coeff_count_power);

        let psi_backward_div_two_rev: Vec<Shoup<u64>> = psi_backward_rev
            .iter()
            .map(|w| prime.shoup.prepare(prime.div2_mod(*w.value())))
            .collect();

        let psi_backward_seq: Vec<Shoup<u64>> = Self::reorder_sequential(&psi_backward_rev);

        Ok(Self {
            q: prime.q,
            two_q: prime.q << 1,
            four_q: prime.q << 2,
            prime: prime,
            coeff_count_power: coeff_count_power,
            coeff_count: n,
            psi: psi,
            psi_forward_rev: psi_forward_rev,
            psi_backward_seq: psi_backward_seq,
            psi_backward_div_two_rev: psi_backward_div_two_rev,
            n_inv: n_inv,
        })
    }

    /// Fills a table with base^i at index bitrev(i), as Shoup pairs.
    fn powers_rev(prime: &Prime<u64>, base: u64, log_n: usize) -> Vec<Shoup<u64>> {
        let n: usize = 1 << log_n;
        let mut powers: Vec<Shoup<u64>> = vec![Shoup(0, 0); n];
        powers[0] = prime.shoup.prepare(1);
        let mut power: u64 = 1;
        for i in 1..n {
            power = prime.mul_mod(power, base);
            powers[i.reverse_bits_msb(log_n as u32)] = prime.shoup.prepare(power);
        }
        powers
    }

    /// Rewrites a bit-reversed table so that a cursor walking slots
    /// 1, 2, ..., n-1 in order yields, for m = n/2, n/4, ..., 1, the
    /// slice rev[m..2m]. This is what lets the backward pass consume one
    /// sequential root stream across all of its stages.
    fn reorder_sequential(rev: &[Shoup<u64>]) -> Vec<Shoup<u64>> {
        let n: usize = rev.len();
        let mut seq: Vec<Shoup<u64>> = vec![Shoup(0, 0); n];
        let mut cursor: usize = 1;
        let mut m: usize = n >> 1;
        while m > 0 {
            seq[cursor..cursor + m].copy_from_slice(&rev[m..2 * m]);
            cursor += m;
            m >>= 1;
        }
        seq
    }
}

impl Table<u64> {
    #[inline(always)]
    pub fn modulus(&self) -> &Prime<u64> {
        &self.prime
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn coeff_count_power(&self) -> usize {
        self.coeff_count_power
    }

    #[inline(always)]
    pub fn coeff_count(&self) -> usize {
        self.coeff_count
    }

    /// The minimal primitive 2n-th root of unity mod q.
    #[inline(always)]
    pub fn psi(&self) -> u64 {
        self.psi
    }

    /// psi^i for i = bitrev(k), in [0, q).
    #[inline(always)]
    pub fn root_power(&self, k: usize) -> u64 {
        *self.psi_forward_rev[k].value()
    }

    /// Shoup pre-multiplier of [`Self::root_power`].
    #[inline(always)]
    pub fn scaled_root_power(&self, k: usize) -> u64 {
        *self.psi_forward_rev[k].quotient()
    }

    /// k-th entry of the sequentially-rewritten inverse-root table; slot 0
    /// is unused.
    #[inline(always)]
    pub fn inv_root_power(&self, k: usize) -> u64 {
        *self.psi_backward_seq[k].value()
    }

    /// Shoup pre-multiplier of [`Self::inv_root_power`].
    #[inline(always)]
    pub fn scaled_inv_root_power(&self, k: usize) -> u64 {
        *self.psi_backward_seq[k].quotient()
    }

    /// psi^-i * 2^-1 mod q for i = bitrev(k).
    #[inline(always)]
    pub fn inv_root_power_div_two(&self, k: usize) -> u64 {
        *self.psi_backward_div_two_rev[k].value()
    }

    /// Shoup pre-multiplier of [`Self::inv_root_power_div_two`].
    #[inline(always)]
    pub fn scaled_inv_root_power_div_two(&self, k: usize) -> u64 {
        *self.psi_backward_div_two_rev[k].quotient()
    }

    /// n^-1 mod q.
    #[inline(always)]
    pub fn inv_degree(&self) -> u64 {
        self.n_inv
    }
}

impl Table<u64> {
    /// In-place forward negacyclic NTT, output in bit-reversed order.
    ///
    /// Inputs must be in [0, q); outputs are left in [0, 4q). Callers that
    /// pipeline further modular operations rely on the relaxed range, so no
    /// trailing reduction is performed here.
    pub fn forward_inplace_lazy(&self, a: &mut [u64]) {
        debug_assert!(
            a.len() == self.coeff_count,
            "invalid a.len() = {} != coeff_count = {}",
            a.len(),
            self.coeff_count
        );

        let n: usize = self.coeff_count;
        let mut t: usize = n >> 1;
        let mut m: usize = 1;
        while m < n {
            if t >= 4 {
                izip!(a.chunks_exact_mut(t << 1), &self.psi_forward_rev[m..]).for_each(
                    |(a, w)| {
                        let (x, y) = a.split_at_mut(t);
                        izip!(x.chunks_exact_mut(4), y.chunks_exact_mut(4)).for_each(|(x, y)| {
                            self.dit_lazy(&mut x[0], &mut y[0], w);
                            self.dit_lazy(&mut x[1], &mut y[1], w);
                            self.dit_lazy(&mut x[2], &mut y[2], w);
                            self.dit_lazy(&mut x[3], &mut y[3], w);
                        });
                    },
                );
            } else {
                izip!(a.chunks_exact_mut(t << 1), &self.psi_forward_rev[m..]).for_each(
                    |(a, w)| {
                        let (x, y) = a.split_at_mut(t);
                        izip!(x, y).for_each(|(x, y)| self.dit_lazy(x, y, w));
                    },
                );
            }
            m <<= 1;
            t >>= 1;
        }
    }

    /// In-place forward negacyclic NTT with outputs reduced into [0, q).
    pub fn forward_inplace(&self, a: &mut [u64]) {
        self.forward_inplace_lazy(a);
        a.iter_mut()
            .for_each(|x| self.prime.barrett.reduce_assign::<BARRETT>(x));
    }

    /// In-place inverse negacyclic NTT from bit-reversed order, including
    /// the multiplication by n^-1 mod q.
    ///
    /// Inputs may be in [0, 2q); outputs are in [0, q). The terminal stage
    /// is merged with the n^-1 normalization, whose reducing Shoup multiply
    /// already lands every entry in the canonical range.
    pub fn backward_inplace(&self, a: &mut [u64]) {
        debug_assert!(
            a.len() == self.coeff_count,
            "invalid a.len() = {} != coeff_count = {}",
            a.len(),
            self.coeff_count
        );

        let n: usize = self.coeff_count;
        let mut t: usize = 1;
        let mut m: usize = n >> 1;
        let mut root_index: usize = 1;
        while m > 1 {
            if t >= 4 {
                izip!(a.chunks_exact_mut(t << 1), &self.psi_backward_seq[root_index..])
                    .for_each(|(a, w)| {
                        let (x, y) = a.split_at_mut(t);
                        izip!(x.chunks_exact_mut(4), y.chunks_exact_mut(4)).for_each(|(x, y)| {
                            self.dif_lazy(&mut x[0], &mut y[0], w);
                            self.dif_lazy(&mut x[1], &mut y[1], w);
                            self.dif_lazy(&mut x[2], &mut y[2], w);
                            self.dif_lazy(&mut x[3], &mut y[3], w);
                        });
                    });
            } else {
                izip!(a.chunks_exact_mut(t << 1), &self.psi_backward_seq[root_index..])
                    .for_each(|(a, w)| {
                        let (x, y) = a.split_at_mut(t);
                        izip!(x, y).for_each(|(x, y)| self.dif_lazy(x, y, w));
                    });
            }
            root_index += m;
            m >>= 1;
            t <<= 1;
        }

        // Terminal merge: the last butterfly stage folded together with the
        // multiplication by n^-1, so no separate normalization pass runs.
        let w: Shoup<u64> = self.psi_backward_seq[root_index];
        let n_inv: Shoup<u64> = self.prime.shoup.prepare(self.n_inv);
        let n_inv_w: Shoup<u64> = self
            .prime
            .shoup
            .prepare(self.prime.mul_mod(self.n_inv, *w.value()));

        let (x, y) = a.split_at_mut(n >> 1);
        izip!(x, y).for_each(|(x, y)| self.dif_last(x, y, n_inv, n_inv_w));
    }

    /// Alias of [`Self::backward_inplace`] advertising the relaxed [0, 2q)
    /// input contract; the output is canonical either way.
    pub fn backward_inplace_lazy(&self, a: &mut [u64]) {
        self.backward_inplace(a);
    }

    /// Harvey butterfly: x, y in [0, 4q) -> x + w*y, x - w*y in [0, 4q).
    #[inline(always)]
    fn dit_lazy(&self, x: &mut u64, y: &mut u64, w: &Shoup<u64>) {
        debug_assert!(*x < self.four_q, "x = {} >= 4q = {}", x, self.four_q);
        debug_assert!(*y < self.four_q, "y = {} >= 4q = {}", y, self.four_q);
        let xr: u64 = x.reduce_once_constant_time(self.two_q);
        let wy: u64 = self.prime.shoup.mul_external_lazy(*w, *y);
        *x = xr + wy;
        *y = xr + self.two_q - wy;
    }

    /// Gentleman-Sande butterfly: x, y in [0, 2q) -> x + y, w*(x - y),
    /// both in [0, 2q).
    #[inline(always)]
    fn dif_lazy(&self, x: &mut u64, y: &mut u64, w: &Shoup<u64>) {
        debug_assert!(*x < self.two_q, "x = {} >= 2q = {}", x, self.two_q);
        debug_assert!(*y < self.two_q, "y = {} >= 2q = {}", y, self.two_q);
        let tx: u64 = *x + *y;
        let ty: u64 = *x + self.two_q - *y;
        *x = tx.reduce_once_constant_time(self.two_q);
        *y = self.prime.shoup.mul_external_lazy(*w, ty);
    }

    /// Terminal butterfly with the n^-1 multiply folded in; outputs in [0, q).
    #[inline(always)]
    fn dif_last(&self, x: &mut u64, y: &mut u64, n_inv: Shoup<u64>, n_inv_w: Shoup<u64>) {
        debug_assert!(*x < self.two_q, "x = {} >= 2q = {}", x, self.two_q);
        debug_assert!(*y < self.two_q, "y = {} >= 2q = {}", y, self.two_q);
        let tx: u64 = (*x + *y).reduce_once_constant_time(self.two_q);
        let ty: u64 = *x + self.two_q - *y;
        *x = self.prime.shoup.mul_external(n_inv, tx);
        *y = self.prime.shoup.mul_external(n_inv_w, ty);
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, x: &mut [u64]) {
        self.forward_inplace(x)
    }

    fn forward_inplace_lazy(&self, x: &mut [u64]) {
        self.forward_inplace_lazy(x)
    }

    fn backward_inplace(&self, x: &mut [u64]) {
        self.backward_inplace(x)
    }

    fn backward_inplace_lazy(&self, x: &mut [u64]) {
        self.backward_inplace_lazy(x)
    }
}

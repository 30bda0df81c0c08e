use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::shoup::ShoupPrecomp;

/// An NTT-friendly prime modulus together with its precomputed constants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    /// distinct prime factors of q-1
    pub factors: Vec<O>,
    pub barrett: BarrettPrecomp<O>,
    pub shoup: ShoupPrecomp<O>,
}

pub mod ntt;

/// In-place transforms between coefficient and evaluation representation.
///
/// The `_lazy` variants relax the output (forward) or input (backward)
/// range contract; see the implementing type for the exact bounds.
pub trait DFT<O> {
    fn forward_inplace(&self, x: &mut [O]);
    fn forward_inplace_lazy(&self, x: &mut [O]);
    fn backward_inplace(&self, x: &mut [O]);
    fn backward_inplace_lazy(&self, x: &mut [O]);
}

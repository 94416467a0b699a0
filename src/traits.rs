use core::fmt::Debug;
use num_traits::Float;

/// Trait for floating-point scalars accepted by the special functions
/// and distributions.
///
/// Blanket-implemented for all types satisfying the bounds, which in
/// practice means `f32` and `f64`.
pub trait FloatScalar: Copy + PartialEq + Debug + Float {}

impl<T: Copy + PartialEq + Debug + Float> FloatScalar for T {}

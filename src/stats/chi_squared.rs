use crate::FloatScalar;
use crate::special::{gamma_inc, lgamma};
use super::{standard_gamma_quantile, ContinuousDistribution, StatsError};

/// Chi-squared distribution with k degrees of freedom.
///
/// Special case of Gamma(k/2, rate 1/2), so quantile(p) = 2·P⁻¹(k/2, p).
///
/// # Example
///
/// ```
/// use quantis::stats::{ChiSquared, ContinuousDistribution};
///
/// let chi2 = ChiSquared::new(3.0_f64).unwrap();
/// assert!((chi2.mean() - 3.0).abs() < 1e-14);
/// assert!((chi2.variance() - 6.0).abs() < 1e-14);
///
/// // 95th percentile of χ²(1)
/// assert!((ChiSquared::new(1.0_f64).unwrap().quantile(0.95) - 3.841459).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChiSquared<T> {
    k: T, // degrees of freedom
}

impl<T: FloatScalar> ChiSquared<T> {
    /// Create a chi-squared distribution with `k` degrees of freedom.
    /// Requires `k` finite and > 0.
    pub fn new(k: T) -> Result<Self, StatsError> {
        if !(k > T::zero()) || !k.is_finite() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { k })
    }

    #[inline]
    fn half_k(&self) -> T {
        self.k / (T::one() + T::one())
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for ChiSquared<T> {
    fn pdf(&self, x: T) -> T {
        if x <= T::zero() {
            return T::zero();
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: T) -> T {
        if x <= T::zero() {
            return T::neg_infinity();
        }
        let one = T::one();
        let two = one + one;
        let half_k = self.half_k();
        (half_k - one) * x.ln() - x / two - half_k * two.ln() - lgamma(half_k)
    }

    fn cdf(&self, x: T) -> T {
        if x <= T::zero() {
            return T::zero();
        }
        let two = T::one() + T::one();
        gamma_inc(self.half_k(), x / two).unwrap_or(T::nan())
    }

    fn quantile(&self, p: T) -> T {
        let two = T::one() + T::one();
        two * standard_gamma_quantile(self.half_k(), p)
    }

    fn mean(&self) -> T {
        self.k
    }

    fn variance(&self) -> T {
        let two = T::one() + T::one();
        two * self.k
    }
}

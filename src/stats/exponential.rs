use crate::FloatScalar;
use super::{ContinuousDistribution, Gamma, StatsError};

/// Exponential distribution with rate λ.
///
/// f(x) = λ exp(−λx) for x ≥ 0. Identical to Gamma(1, λ), but with a
/// closed-form quantile −ln(1−p)/λ.
///
/// # Example
///
/// ```
/// use quantis::stats::{Exponential, ContinuousDistribution};
///
/// let e = Exponential::new(2.0_f64).unwrap();
/// assert!((e.mean() - 0.5).abs() < 1e-14);
/// assert!((e.cdf(0.0)).abs() < 1e-14);
///
/// // Same quantile as the Halley-refined Gamma(1, λ)
/// let g = e.to_gamma();
/// assert!((e.quantile(0.8) - g.quantile(0.8)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Exponential<T> {
    lambda: T,
}

impl<T: FloatScalar> Exponential<T> {
    /// Create an exponential distribution with rate `lambda`.
    /// Requires `lambda` finite and > 0.
    pub fn new(lambda: T) -> Result<Self, StatsError> {
        if !(lambda > T::zero()) || !lambda.is_finite() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { lambda })
    }

    /// The equivalent Gamma(shape = 1, rate = λ).
    pub fn to_gamma(&self) -> Gamma<T> {
        Gamma::from_validated(T::one(), self.lambda)
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Exponential<T> {
    fn pdf(&self, x: T) -> T {
        if x < T::zero() {
            T::zero()
        } else {
            self.lambda * (-self.lambda * x).exp()
        }
    }

    fn ln_pdf(&self, x: T) -> T {
        if x < T::zero() {
            T::neg_infinity()
        } else {
            self.lambda.ln() - self.lambda * x
        }
    }

    fn cdf(&self, x: T) -> T {
        if x <= T::zero() {
            T::zero()
        } else {
            -(-self.lambda * x).exp_m1()
        }
    }

    fn quantile(&self, p: T) -> T {
        if p <= T::zero() {
            return T::zero();
        }
        -(-p).ln_1p() / self.lambda
    }

    fn mean(&self) -> T {
        self.lambda.recip()
    }

    fn variance(&self) -> T {
        (self.lambda * self.lambda).recip()
    }
}

use crate::FloatScalar;
use crate::special::{gamma_inc_upper, lgamma, normal_quantile_approx};
use super::{DiscreteDistribution, StatsError};

/// Headroom on the quantile search, beyond the Cornish–Fisher estimate.
const SEARCH_SLACK: u64 = 1000;

/// Poisson distribution with rate λ.
///
/// P(X = k) = λ^k e^{−λ} / k! for k = 0, 1, 2, …
///
/// # Example
///
/// ```
/// use quantis::stats::{Poisson, DiscreteDistribution};
///
/// let p = Poisson::new(3.0_f64).unwrap();
/// assert!((p.mean() - 3.0).abs() < 1e-14);
/// assert!((p.variance() - 3.0).abs() < 1e-14);
/// assert_eq!(p.quantile(0.5), Some(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Poisson<T> {
    lambda: T,
}

impl<T: FloatScalar> Poisson<T> {
    /// Create a Poisson distribution with rate `lambda`.
    /// Requires `lambda` finite and > 0.
    pub fn new(lambda: T) -> Result<Self, StatsError> {
        if !(lambda > T::zero()) || !lambda.is_finite() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { lambda })
    }

    /// Smallest k with P(X ≤ k) ≥ p.
    ///
    /// Starts from the Cornish–Fisher estimate λ + σ(z + (z² − 1)/(6σ)) and
    /// walks the CDF to the exact boundary. Returns `Some(0)` for p ≤ 0 and
    /// `None` for p ≥ 1 (unbounded) or NaN.
    pub fn quantile(&self, p: T) -> Option<u64> {
        if p.is_nan() || p >= T::one() {
            return None;
        }
        if p <= T::zero() {
            return Some(0);
        }

        let one = T::one();
        let sigma = self.lambda.sqrt();
        let z = normal_quantile_approx(p);
        let six = T::from(6.0).unwrap();
        let estimate = self.lambda + sigma * (z + (z * z - one) / (six * sigma));
        let mut k = num_traits::cast::<T, u64>(estimate.max(T::zero()).floor()).unwrap_or(0);

        let limit = num_traits::cast::<T, u64>(self.lambda.ceil())
            .unwrap_or(u64::MAX)
            .saturating_mul(10)
            .saturating_add(k)
            .saturating_add(SEARCH_SLACK);

        while self.cdf(k) < p && k < limit {
            k += 1;
        }
        while k > 0 && self.cdf(k - 1) >= p {
            k -= 1;
        }
        Some(k)
    }
}

impl<T: FloatScalar> DiscreteDistribution<T> for Poisson<T> {
    fn pmf(&self, k: u64) -> T {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: u64) -> T {
        let kf = T::from(k).unwrap();
        kf * self.lambda.ln() - self.lambda - lgamma(kf + T::one())
    }

    fn cdf(&self, k: u64) -> T {
        // P(X ≤ k) = Q(k+1, λ)
        let a = T::from(k).unwrap() + T::one();
        gamma_inc_upper(a, self.lambda).unwrap_or(T::nan())
    }

    fn mean(&self) -> T {
        self.lambda
    }

    fn variance(&self) -> T {
        self.lambda
    }
}

//! Gamma-family distributions.
//!
//! Each distribution provides [`ContinuousDistribution`] or [`DiscreteDistribution`]
//! trait implementations for a consistent API across all distributions.
//!
//! # Continuous distributions
//!
//! | Distribution | Parameters | Support |
//! |---|---|---|
//! | [`Gamma`] | shape α, rate β | (0, ∞) |
//! | [`ChiSquared`] | degrees of freedom k | [0, ∞) |
//! | [`Exponential`] | rate λ | [0, ∞) |
//!
//! # Discrete distributions
//!
//! | Distribution | Parameters | Support |
//! |---|---|---|
//! | [`Poisson`] | rate λ | {0, 1, 2, …} |
//!
//! Continuous quantiles return 0 at p ≤ 0, +∞ at p ≥ 1, and NaN if the
//! incomplete gamma inverse fails. Call [`gamma_inc_inv`](crate::special::gamma_inc_inv)
//! directly to see why.
//!
//! # Example
//!
//! ```
//! use quantis::stats::{Gamma, ContinuousDistribution};
//!
//! let g = Gamma::new(10.0_f64, 1.0).unwrap();
//! assert!((g.quantile(0.5) - 9.6687).abs() < 1e-3);
//! assert!((g.cdf(g.quantile(0.9)) - 0.9).abs() < 1e-8);
//! ```

mod chi_squared;
mod exponential;
mod gamma_dist;
mod poisson;

#[cfg(test)]
mod tests;

pub use chi_squared::ChiSquared;
pub use exponential::Exponential;
pub use gamma_dist::Gamma;
pub use poisson::Poisson;

use crate::special::gamma_inc_inv;
use crate::traits::FloatScalar;

/// Errors from distribution construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    /// A parameter is out of its valid range.
    InvalidParameter,
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::InvalidParameter => {
                write!(f, "distribution parameter out of valid range")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}

/// Trait for continuous probability distributions.
pub trait ContinuousDistribution<T> {
    /// Probability density function.
    fn pdf(&self, x: T) -> T;
    /// Natural log of the probability density function.
    fn ln_pdf(&self, x: T) -> T;
    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: T) -> T;
    /// Quantile function (inverse CDF). Returns x such that P(X ≤ x) = p.
    fn quantile(&self, p: T) -> T;
    /// Expected value E\[X\].
    fn mean(&self) -> T;
    /// Variance Var(X).
    fn variance(&self) -> T;
}

/// Trait for discrete probability distributions.
pub trait DiscreteDistribution<T> {
    /// Probability mass function P(X = k).
    fn pmf(&self, k: u64) -> T;
    /// Natural log of the probability mass function.
    fn ln_pmf(&self, k: u64) -> T;
    /// Cumulative distribution function P(X ≤ k).
    fn cdf(&self, k: u64) -> T;
    /// Expected value E\[X\].
    fn mean(&self) -> T;
    /// Variance Var(X).
    fn variance(&self) -> T;
}

/// p-quantile of Gamma(shape, scale = 1), with the boundary conventions of
/// [`ContinuousDistribution::quantile`].
pub(crate) fn standard_gamma_quantile<T: FloatScalar>(shape: T, p: T) -> T {
    if p.is_nan() {
        return p;
    }
    if p <= T::zero() {
        return T::zero();
    }
    if p >= T::one() {
        return T::infinity();
    }
    gamma_inc_inv(shape, p).unwrap_or(T::nan())
}

use super::*;

// ======================== Exponential ========================

#[test]
fn exponential_pdf_cdf() {
    let e = Exponential::new(1.0_f64).unwrap();
    assert!((e.pdf(0.0) - 1.0).abs() < 1e-14);
    assert!((e.pdf(1.0) - (-1.0_f64).exp()).abs() < 1e-14);
    assert!((e.cdf(0.0)).abs() < 1e-14);
    assert!((e.cdf(1.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-14);
}

#[test]
fn exponential_quantile() {
    let e = Exponential::new(2.0_f64).unwrap();
    assert!((e.quantile(0.0)).abs() < 1e-14);
    let q = e.quantile(0.5);
    assert!((q - core::f64::consts::LN_2 / 2.0).abs() < 1e-14);
    assert!((e.cdf(q) - 0.5).abs() < 1e-12);
    assert!(e.quantile(1.0).is_infinite());
}

#[test]
fn exponential_invalid() {
    assert_eq!(Exponential::new(0.0_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Exponential::new(-1.0_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Exponential::new(f64::NAN).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Gamma ========================

#[test]
fn gamma_pdf_at_mode() {
    // Gamma(2, 1): mode at x = (α-1)/β = 1, pdf(1) = 1/e
    let g = Gamma::new(2.0_f64, 1.0).unwrap();
    assert!((g.pdf(1.0) - (-1.0_f64).exp()).abs() < 1e-14);
}

#[test]
fn gamma_pdf_at_zero() {
    assert_eq!(Gamma::new(1.0_f64, 3.0).unwrap().pdf(0.0), 3.0);
    assert_eq!(Gamma::new(2.0_f64, 1.0).unwrap().pdf(0.0), 0.0);
    assert!(Gamma::new(0.5_f64, 1.0).unwrap().pdf(0.0).is_infinite());
}

#[test]
fn gamma_median_shape_ten() {
    let g = Gamma::new(10.0_f64, 1.0).unwrap();
    let x = g.quantile(0.5);
    assert!((x - 9.6687).abs() < 1e-3, "median = {x}");
    assert!((g.cdf(x) - 0.5).abs() < 1e-8);
}

#[test]
fn gamma_quantile_roundtrip() {
    let g = Gamma::new(3.0_f64, 2.0).unwrap();
    for &p in &[0.001, 0.1, 0.25, 0.5, 0.75, 0.9, 0.999] {
        let x = g.quantile(p);
        assert!((g.cdf(x) - p).abs() < 1e-8, "p={p}: cdf(quantile(p))={}", g.cdf(x));
    }
}

#[test]
fn gamma_quantile_small_shape() {
    let g = Gamma::new(0.3_f64, 1.0).unwrap();
    for &p in &[0.05, 0.2, 0.5, 0.8, 0.99] {
        let x = g.quantile(p);
        assert!(x > 0.0);
        assert!((g.cdf(x) - p).abs() < 1e-8, "p={p}: cdf(quantile(p))={}", g.cdf(x));
    }
}

#[test]
fn gamma_quantile_scales_with_rate() {
    let unit = Gamma::new(4.0_f64, 1.0).unwrap();
    let fast = Gamma::new(4.0_f64, 5.0).unwrap();
    for &p in &[0.1, 0.5, 0.9] {
        assert!((fast.quantile(p) - unit.quantile(p) / 5.0).abs() < 1e-10);
    }
}

#[test]
fn gamma_quantile_boundaries() {
    let g = Gamma::new(2.0_f64, 1.0).unwrap();
    assert_eq!(g.quantile(0.0), 0.0);
    assert_eq!(g.quantile(-0.5), 0.0);
    assert!(g.quantile(1.0).is_infinite());
    assert!(g.quantile(f64::NAN).is_nan());
}

#[test]
fn gamma_quantile_solver_failure_is_nan() {
    // Power-law guess underflows to zero for a tiny shape and small p
    let g = Gamma::new(0.01_f64, 1.0).unwrap();
    assert!(g.quantile(1e-5).is_nan());
}

#[test]
fn gamma_from_shape_scale() {
    let g = Gamma::from_shape_scale(3.0_f64, 4.0).unwrap();
    assert!((g.rate() - 0.25).abs() < 1e-15);
    assert!((g.shape() - 3.0).abs() < 1e-15);
    assert!((g.mean() - 12.0).abs() < 1e-12);
    assert_eq!(Gamma::from_shape_scale(3.0_f64, 0.0).unwrap_err(), StatsError::InvalidParameter);
}

#[test]
fn gamma_mean_variance() {
    let g = Gamma::new(5.0_f64, 2.0).unwrap();
    assert!((g.mean() - 2.5).abs() < 1e-14);
    assert!((g.variance() - 1.25).abs() < 1e-14);
}

#[test]
fn gamma_invalid() {
    assert_eq!(Gamma::new(0.0_f64, 1.0).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Gamma::new(1.0_f64, 0.0).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Gamma::new(f64::INFINITY, 1.0).unwrap_err(), StatsError::InvalidParameter);
}

#[test]
fn gamma_f32() {
    let g = Gamma::new(10.0_f32, 1.0).unwrap();
    let x = g.quantile(0.5);
    assert!((x - 9.6687).abs() < 1e-2, "median = {x}");
}

#[test]
fn gamma_f32_large_shape() {
    // One f32 ulp near 1e5 is 0.0078, far above the absolute tolerance
    let g = Gamma::new(1e5_f32, 1.0).unwrap();
    let x = g.quantile(0.5);
    assert!(x.is_finite(), "median = {x}");
    assert!((x - 99_999.67).abs() < 1.0, "median = {x}");
}

// ======================== ChiSquared ========================

#[test]
fn chi_squared_cdf() {
    // χ²(2) CDF at x has closed form: 1 - exp(-x/2)
    let chi2 = ChiSquared::new(2.0_f64).unwrap();
    assert!((chi2.cdf(2.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);
}

#[test]
fn chi_squared_quantile_reference() {
    // Standard table values
    let cases = [
        (1.0_f64, 0.95, 3.841458820694124),
        (2.0, 0.95, 5.991464547107979),
        (10.0, 0.5, 9.341817765591966),
    ];
    for &(k, p, expected) in &cases {
        let q = ChiSquared::new(k).unwrap().quantile(p);
        assert!((q - expected).abs() < 1e-6, "k={k}, p={p}: {q} vs {expected}");
    }
}

#[test]
fn chi_squared_quantile_two_dof_closed_form() {
    // χ²(2) quantile is −2 ln(1 − p)
    let chi2 = ChiSquared::new(2.0_f64).unwrap();
    for &p in &[0.05, 0.5, 0.95] {
        assert!((chi2.quantile(p) + 2.0 * (1.0 - p).ln()).abs() < 1e-9);
    }
}

#[test]
fn chi_squared_quantile_roundtrip() {
    let chi2 = ChiSquared::new(5.0_f64).unwrap();
    for &p in &[0.1, 0.25, 0.5, 0.75, 0.9, 0.95] {
        let x = chi2.quantile(p);
        assert!(
            (chi2.cdf(x) - p).abs() < 1e-8,
            "p={p}: cdf(quantile(p))={}",
            chi2.cdf(x)
        );
    }
}

#[test]
fn chi_squared_mean_variance() {
    let chi2 = ChiSquared::new(10.0_f64).unwrap();
    assert!((chi2.mean() - 10.0).abs() < 1e-14);
    assert!((chi2.variance() - 20.0).abs() < 1e-14);
}

#[test]
fn chi_squared_invalid() {
    assert_eq!(ChiSquared::new(0.0_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(ChiSquared::new(f64::NAN).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Poisson ========================

#[test]
fn poisson_pmf() {
    let p = Poisson::new(1.0_f64).unwrap();
    // P(0) = P(1) = e^{-1}, P(2) = e^{-1}/2
    assert!((p.pmf(0) - (-1.0_f64).exp()).abs() < 1e-14);
    assert!((p.pmf(1) - (-1.0_f64).exp()).abs() < 1e-14);
    assert!((p.pmf(2) - (-1.0_f64).exp() / 2.0).abs() < 1e-14);
}

#[test]
fn poisson_cdf_reference_rate_ten() {
    let p = Poisson::new(10.0_f64).unwrap();
    let cases = [
        (0, 4.539993e-05),
        (1, 0.0004993992),
        (2, 0.002769396),
        (3, 0.01033605),
        (5, 0.06708596),
    ];
    for &(k, expected) in &cases {
        assert!((p.cdf(k) - expected).abs() < 1e-6, "k={k}: {} vs {expected}", p.cdf(k));
    }
}

#[test]
fn poisson_cdf_matches_pmf_sum() {
    let p = Poisson::new(3.0_f64).unwrap();
    for k in 0..15 {
        let cdf = p.cdf(k);
        let pmf_sum: f64 = (0..=k).map(|j| p.pmf(j)).sum();
        assert!(
            (cdf - pmf_sum).abs() < 1e-10,
            "k={k}: cdf={cdf}, pmf_sum={pmf_sum}"
        );
    }
}

#[test]
fn poisson_quantile_is_smallest_k() {
    for &lambda in &[0.5_f64, 3.0, 10.0, 75.0] {
        let d = Poisson::new(lambda).unwrap();
        for &p in &[0.01, 0.1, 0.5, 0.9, 0.999] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p, "λ={lambda}, p={p}: cdf({k}) = {}", d.cdf(k));
            if k > 0 {
                assert!(d.cdf(k - 1) < p, "λ={lambda}, p={p}: k={k} not minimal");
            }
        }
    }
}

#[test]
fn poisson_quantile_boundaries() {
    let d = Poisson::new(4.0_f64).unwrap();
    assert_eq!(d.quantile(0.0), Some(0));
    assert_eq!(d.quantile(1.0), None);
    assert_eq!(d.quantile(f64::NAN), None);
    assert_eq!(Poisson::new(10.0_f64).unwrap().quantile(0.5), Some(10));
}

#[test]
fn poisson_cdf_at_max_count() {
    assert_eq!(Poisson::new(3.0_f64).unwrap().cdf(u64::MAX), 1.0);
    assert_eq!(Poisson::new(3.0_f32).unwrap().cdf(u64::MAX), 1.0);
}

#[test]
fn poisson_mean_variance() {
    let p = Poisson::new(5.5_f64).unwrap();
    assert!((p.mean() - 5.5).abs() < 1e-14);
    assert!((p.variance() - 5.5).abs() < 1e-14);
}

#[test]
fn poisson_invalid() {
    assert_eq!(Poisson::new(0.0_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Poisson::new(-1.0_f64).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Cross-distribution ========================

#[test]
fn gamma_exponential_equivalence() {
    // Gamma(1, λ) = Exponential(λ)
    let e = Exponential::new(2.0_f64).unwrap();
    let g = e.to_gamma();
    for &x in &[0.0, 0.5, 1.0, 2.0, 5.0] {
        assert!(
            (g.pdf(x) - e.pdf(x)).abs() < 1e-12,
            "pdf at {x}: {} vs {}",
            g.pdf(x),
            e.pdf(x)
        );
        assert!(
            (g.cdf(x) - e.cdf(x)).abs() < 1e-12,
            "cdf at {x}: {} vs {}",
            g.cdf(x),
            e.cdf(x)
        );
    }
    for &p in &[0.01, 0.3, 0.7, 0.99] {
        assert!(
            (g.quantile(p) - e.quantile(p)).abs() < 1e-9,
            "quantile at {p}: {} vs {}",
            g.quantile(p),
            e.quantile(p)
        );
    }
}

#[test]
fn chi_squared_gamma_equivalence() {
    // χ²(k) = Gamma(k/2, 1/2)
    let chi2 = ChiSquared::new(6.0_f64).unwrap();
    let g = Gamma::new(3.0, 0.5).unwrap();
    for &x in &[1.0, 3.0, 5.0, 10.0] {
        assert!((chi2.pdf(x) - g.pdf(x)).abs() < 1e-12);
        assert!((chi2.cdf(x) - g.cdf(x)).abs() < 1e-12);
    }
    for &p in &[0.05, 0.5, 0.95] {
        assert!((chi2.quantile(p) - g.quantile(p)).abs() < 1e-9);
    }
}

#[test]
fn poisson_gamma_duality() {
    // P(X ≤ k) for X ~ Poisson(λ) equals P(Y > λ) for Y ~ Gamma(k+1, 1)
    let d = Poisson::new(7.0_f64).unwrap();
    for k in [0_u64, 3, 7, 12] {
        let g = Gamma::new((k + 1) as f64, 1.0).unwrap();
        assert!((d.cdf(k) - (1.0 - g.cdf(7.0))).abs() < 1e-12);
    }
}

#[cfg(feature = "std")]
#[test]
fn error_display() {
    let s = std::format!("{}", StatsError::InvalidParameter);
    assert!(s.contains("parameter"));
}

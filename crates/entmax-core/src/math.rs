//! Mathematical utilities shared by the basis and kernel crates
//!
//! Gaussian densities, moments of (truncated) Gaussians, and the Beta-type
//! constants that normalize entmax Gaussians.

/// Normal distribution utilities
pub mod normal {
    use statrs::function::erf::erf;
    use std::f64::consts::{PI, SQRT_2};

    /// Density of `N(mean, variance)` at `x`
    #[inline]
    pub fn pdf(x: f64, mean: f64, variance: f64) -> f64 {
        let z = x - mean;
        (-z * z / (2.0 * variance)).exp() / (2.0 * PI * variance).sqrt()
    }

    /// Cumulative distribution of `N(mean, variance)` at `x`
    #[inline]
    pub fn cdf(x: f64, mean: f64, variance: f64) -> f64 {
        0.5 * (1.0 + erf((x - mean) / (SQRT_2 * variance.sqrt())))
    }

    /// Raw moments `E[t^k]` for `k = 0..=max_power` under `N(mean, variance)`.
    ///
    /// Uses `M_k = mean * M_{k-1} + (k - 1) * variance * M_{k-2}`.
    pub fn raw_moments(max_power: usize, mean: f64, variance: f64) -> Vec<f64> {
        let mut moments = Vec::with_capacity(max_power + 1);
        moments.push(1.0);
        for k in 1..=max_power {
            let mut next = mean * moments[k - 1];
            if k >= 2 {
                next += (k - 1) as f64 * variance * moments[k - 2];
            }
            moments.push(next);
        }
        moments
    }

    /// Truncated moments `∫_u^v t^k N(t; mean, variance) dt` for
    /// `k = 0..=max_power`.
    ///
    /// Integration by parts on `(t - mean) N = -variance * N'` gives
    /// `I_k = mean I_{k-1} + (k-1) variance I_{k-2} - variance [t^{k-1} N(t)]_u^v`.
    pub fn truncated_moments(max_power: usize, mean: f64, variance: f64, u: f64, v: f64) -> Vec<f64> {
        let pu = pdf(u, mean, variance);
        let pv = pdf(v, mean, variance);
        let mut moments = Vec::with_capacity(max_power + 1);
        moments.push(cdf(v, mean, variance) - cdf(u, mean, variance));

        // u^{k-1}, v^{k-1}
        let mut u_pow = 1.0;
        let mut v_pow = 1.0;
        for k in 1..=max_power {
            let mut next = mean * moments[k - 1] - variance * (v_pow * pv - u_pow * pu);
            if k >= 2 {
                next += (k - 1) as f64 * variance * moments[k - 2];
            }
            moments.push(next);
            u_pow *= u;
            v_pow *= v;
        }
        moments
    }

}

/// Normalizing constants of the entmax Gaussian family
pub mod entmax {
    use statrs::function::gamma::ln_gamma;
    use std::f64::consts::PI;

    /// `ln C(n)` with `C(n) = Γ(n + 3/2) / (√π Γ(n + 1))`, so that
    /// `∫_{-a}^{a} (a² - x²)^n dx = a^{2n+1} / C(n)`.
    ///
    /// Kept in the log domain: the scale conversions raise it to powers
    /// `1/(2n+1)` and `1/n` that overflow for large `n`.
    pub fn ln_support_constant(n: f64) -> f64 {
        ln_gamma(n + 1.5) - ln_gamma(n + 1.0) - 0.5 * PI.ln()
    }

}

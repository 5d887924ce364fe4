//! Gaussian radial basis functions `ψ_j(t) = N(t; μ_j, σ_j²)`

use crate::traits::{check_moment_args, BasisFunctions};
use entmax_core::{math::normal, Error, Result};
use nalgebra::{DMatrix, DVector};

/// Gaussian bumps with per-function centers and widths.
///
/// Interval integrals use the truncated-moment recursion (erf based);
/// Gaussian-weighted integrals collapse the product of two Gaussians
/// into a scaled Gaussian and take its raw moments.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBasis {
    mu: Vec<f64>,
    sigma_sq: Vec<f64>,
}

impl GaussianBasis {
    /// Create a basis from centers and standard deviations
    pub fn new(mu: Vec<f64>, sigma: Vec<f64>) -> Result<Self> {
        if mu.is_empty() {
            return Err(Error::InvalidParameter(
                "GaussianBasis needs at least one function".to_string(),
            ));
        }
        if mu.len() != sigma.len() {
            return Err(Error::size_mismatch(mu.len(), sigma.len(), "GaussianBasis widths"));
        }
        if let Some(&bad) = sigma.iter().find(|s| !(**s > 0.0 && s.is_finite())) {
            return Err(Error::non_positive("basis sigma", bad));
        }
        let sigma_sq = sigma.iter().map(|s| s * s).collect();
        Ok(Self { mu, sigma_sq })
    }

    /// `n` centers evenly spaced on `[lo, hi]`, all with width `sigma`
    pub fn evenly_spaced(n: usize, lo: f64, hi: f64, sigma: f64) -> Result<Self> {
        let mu = match n {
            0 => Vec::new(),
            1 => vec![0.5 * (lo + hi)],
            _ => (0..n)
                .map(|j| lo + (hi - lo) * j as f64 / (n - 1) as f64)
                .collect(),
        };
        Self::new(mu, vec![sigma; n])
    }

    pub fn centers(&self) -> &[f64] {
        &self.mu
    }

    pub fn variances(&self) -> &[f64] {
        &self.sigma_sq
    }
}

impl BasisFunctions for GaussianBasis {
    fn len(&self) -> usize {
        self.mu.len()
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn evaluate(&self, points: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(points.len(), self.mu.len(), |i, j| {
            normal::pdf(points[i], self.mu[j], self.sigma_sq[j])
        })
    }

    fn integrate_t_pow_times_psi(
        &self,
        power: usize,
        u: &DVector<f64>,
        v: &DVector<f64>,
    ) -> Result<DMatrix<f64>> {
        check_moment_args(self.name(), power, u, v)?;
        let mut out = DMatrix::zeros(u.len(), self.mu.len());
        for b in 0..u.len() {
            for j in 0..self.mu.len() {
                let moments = normal::truncated_moments(power, self.mu[j], self.sigma_sq[j], u[b], v[b]);
                out[(b, j)] = moments[power];
            }
        }
        Ok(out)
    }

    fn integrate_t_pow_times_psi_gaussian(
        &self,
        power: usize,
        mu: &DVector<f64>,
        sigma_sq: &DVector<f64>,
    ) -> Result<DMatrix<f64>> {
        check_moment_args(self.name(), power, mu, sigma_sq)?;
        let mut out = DMatrix::zeros(mu.len(), self.mu.len());
        for b in 0..mu.len() {
            for j in 0..self.mu.len() {
                // N(t; μ_j, s_j²) N(t; μ, σ²) = N(μ_j; μ, s_j² + σ²) N(t; m*, v*)
                let total = self.sigma_sq[j] + sigma_sq[b];
                let scale = normal::pdf(self.mu[j], mu[b], total);
                let var_star = self.sigma_sq[j] * sigma_sq[b] / total;
                let mean_star = (self.mu[j] * sigma_sq[b] + mu[b] * self.sigma_sq[j]) / total;
                out[(b, j)] = scale * normal::raw_moments(power, mean_star, var_star)[power];
            }
        }
        Ok(out)
    }
}

//! The basis-function contract consumed by entmax kernels

use entmax_core::{check_batch, Error, Result};
use nalgebra::{DMatrix, DVector};

/// Highest `k` for which `∫ t^k ψ(t) dt` is part of the analytic menu
pub const MAX_MOMENT_POWER: usize = 6;

/// A family of `P` scalar functions `ψ_1..ψ_P` over the real line.
///
/// Kernels treat a basis as a value: every method takes `&self`. Batched
/// interval endpoints and Gaussian parameters are `DVector`s of length `B`
/// and every integral comes back as a `B x P` matrix.
pub trait BasisFunctions: Send + Sync {
    /// Number of functions `P`
    fn len(&self) -> usize;

    /// Whether the basis has no functions
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of this basis for debugging/logging
    fn name(&self) -> &'static str;

    /// Evaluate every function at every point: `N x P`.
    fn evaluate(&self, points: &[f64]) -> DMatrix<f64>;

    /// `∫_u^v t^power ψ(t) dt` for `power <= MAX_MOMENT_POWER`.
    fn integrate_t_pow_times_psi(
        &self,
        power: usize,
        u: &DVector<f64>,
        v: &DVector<f64>,
    ) -> Result<DMatrix<f64>>;

    /// `∫ t^power ψ(t) N(t; mu, sigma_sq) dt` over the real line.
    fn integrate_t_pow_times_psi_gaussian(
        &self,
        power: usize,
        mu: &DVector<f64>,
        sigma_sq: &DVector<f64>,
    ) -> Result<DMatrix<f64>>;

    fn integrate_psi(&self, u: &DVector<f64>, v: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi(0, u, v)
    }

    fn integrate_t_times_psi(&self, u: &DVector<f64>, v: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi(1, u, v)
    }

    fn integrate_t2_times_psi(&self, u: &DVector<f64>, v: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi(2, u, v)
    }

    fn integrate_t3_times_psi(&self, u: &DVector<f64>, v: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi(3, u, v)
    }

    fn integrate_t4_times_psi(&self, u: &DVector<f64>, v: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi(4, u, v)
    }

    fn integrate_t5_times_psi(&self, u: &DVector<f64>, v: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi(5, u, v)
    }

    fn integrate_t6_times_psi(&self, u: &DVector<f64>, v: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi(6, u, v)
    }

    fn integrate_psi_gaussian(&self, mu: &DVector<f64>, sigma_sq: &DVector<f64>) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi_gaussian(0, mu, sigma_sq)
    }

    fn integrate_t_times_psi_gaussian(
        &self,
        mu: &DVector<f64>,
        sigma_sq: &DVector<f64>,
    ) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi_gaussian(1, mu, sigma_sq)
    }

    fn integrate_t2_times_psi_gaussian(
        &self,
        mu: &DVector<f64>,
        sigma_sq: &DVector<f64>,
    ) -> Result<DMatrix<f64>> {
        self.integrate_t_pow_times_psi_gaussian(2, mu, sigma_sq)
    }
}

/// Validate a moment power and a pair of batched vectors.
///
/// Shared by every implementation so the error surface is identical.
pub fn check_moment_args(
    basis: &str,
    power: usize,
    first: &DVector<f64>,
    second: &DVector<f64>,
) -> Result<()> {
    if power > MAX_MOMENT_POWER {
        return Err(Error::unsupported(
            basis,
            "integrals of t^k * psi beyond k = 6",
        ));
    }
    check_batch(second, first.len(), "basis integral arguments")
}

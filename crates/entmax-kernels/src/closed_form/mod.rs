//! Closed-form expectations
//!
//! On its support `[μ - a, μ + a]` every polynomial family has density
//! `p(t) = Σ_j c_j t^j`, so
//!
//! ```text
//! E[t^k ψ(t)] = Σ_j c_j ∫_{μ-a}^{μ+a} t^{j+k} ψ(t) dt
//! ```
//!
//! which only needs the basis' analytic moment integrals. The Gaussian
//! uses the basis' Gaussian-weighted integrals instead.
//!
//! # Precision
//!
//! The coefficients `c_j` expand the density in raw powers of `t`, not of
//! `t - μ`. When `|μ|` is large against the half-width `a` the terms of the
//! sum cancel and the result loses digits: a triweight with `μ = 200` and
//! `σ² = 0.01` is unusable. Center the inputs before building the kernel,
//! or use the numeric [`KernelFamily::Entmax`](crate::KernelFamily) path.

pub mod biweight;
pub mod gaussian;
pub mod sparsemax;
pub mod triweight;
pub mod uniform;

use crate::params::KernelParameters;
use entmax_basis::BasisFunctions;
use entmax_core::Result;
use nalgebra::{DMatrix, DVector};

/// Multiply row `b` of `m` by `s[b]`.
pub(crate) fn scale_rows(mut m: DMatrix<f64>, s: &DVector<f64>) -> DMatrix<f64> {
    for b in 0..m.nrows() {
        m.row_mut(b).scale_mut(s[b]);
    }
    m
}

/// `Σ_j c_j ∫_u^v t^{j+power} ψ(t) dt` over the kernel's support.
pub(crate) fn polynomial_expectation<B>(
    coefficients: &[DVector<f64>],
    power: usize,
    params: &KernelParameters,
    psi: &B,
) -> Result<DMatrix<f64>>
where
    B: BasisFunctions + ?Sized,
{
    let (u, v) = params.support();
    let mut total = DMatrix::zeros(params.batch_size(), psi.len());
    for (j, c) in coefficients.iter().enumerate() {
        let integral = psi.integrate_t_pow_times_psi(j + power, &u, &v)?;
        total += scale_rows(integral, c);
    }
    Ok(total)
}

/// Coefficients of `q(t) = -τ - (t - μ)²/(2σ²) = A + B t + C t²`.
pub(crate) fn quadratic(params: &KernelParameters) -> Result<[DVector<f64>; 3]> {
    let mu = params.mu();
    let sigma_sq = params.sigma_sq()?;
    let tau = params.tau()?;

    let a = DVector::from_fn(mu.len(), |b, _| -tau[b] - mu[b] * mu[b] / (2.0 * sigma_sq[b]));
    let b = mu.component_div(sigma_sq);
    let c = sigma_sq.map(|s| -1.0 / (2.0 * s));
    Ok([a, b, c])
}

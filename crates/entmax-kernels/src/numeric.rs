//! Trapezoidal fallback for kernels without a closed form
//!
//! Every integral is taken over a fixed grid of `config.num_samples` evenly
//! spaced points per batch element. The grid is not adaptive.

use crate::params::KernelParameters;
use entmax_basis::BasisFunctions;
use entmax_core::quadrature::ensure_finite;
use entmax_core::{linspace_batch, map_batch, trapz, trapz_columns, QuadratureConfig, Result};
use entmax_distributions::EntmaxDensity;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

/// Half-width, in standard deviations, of the window used for densities
/// with unbounded support
const GAUSSIAN_WINDOW: f64 = 12.0;

/// `∫ p(t) t^power ψ(t) dt` over `[μ - a, μ + a]`, one trapezoid per
/// batch element and basis function.
pub fn expectation<B>(
    density: &dyn EntmaxDensity,
    params: &KernelParameters,
    power: usize,
    psi: &B,
    config: &QuadratureConfig,
) -> Result<DMatrix<f64>>
where
    B: BasisFunctions + ?Sized,
{
    debug!(
        density = density.name(),
        power,
        samples = config.num_samples,
        "numeric expectation"
    );
    let (lo, hi) = params.support();
    let grid = linspace_batch(&lo, &hi, config.num_samples)?;
    let weights = density.pdf(&grid)?;

    let rows = map_batch(params.batch_size(), |b| {
        let points: Vec<f64> = grid.column(b).iter().copied().collect();
        let values = psi.evaluate(&points);
        let weighted: Vec<f64> = points
            .iter()
            .zip(weights.column(b).iter())
            .map(|(t, p)| p * t.powi(power as i32))
            .collect();

        Ok((0..psi.len())
            .map(|j| {
                let integrand: Vec<f64> = weighted
                    .iter()
                    .zip(values.column(j).iter())
                    .map(|(w, v)| w * v)
                    .collect();
                trapz(integrand.iter(), points.iter())
            })
            .collect::<Vec<f64>>())
    })?;

    let result = DMatrix::from_fn(params.batch_size(), psi.len(), |b, j| rows[b][j]);
    ensure_finite(result.iter(), "numeric expectation")?;
    Ok(result)
}

/// `‖p‖_β^β` with `β = 2 - α`:
///
/// ```text
/// ∫_{-a}^{a} [(α - 1)(-τ - t²/(2σ²))]_+^{1/(α_esc - 1)} dt
/// ```
///
/// where `α_esc = 1/(2 - α)`. An infinite escort exponent gives `2a`.
pub fn escort_normalizer(
    params: &KernelParameters,
    alpha: f64,
    escort_alpha: f64,
    config: &QuadratureConfig,
) -> Result<DVector<f64>> {
    if escort_alpha.is_infinite() {
        return Ok(params.support_size());
    }
    let exponent = 1.0 / (escort_alpha - 1.0);
    let tau = params.tau()?;
    let sigma_sq = params.sigma_sq()?;
    let a = params.half_width();
    trace!(alpha, escort_alpha, exponent, "numeric escort normalizer");

    let grid = linspace_batch(&a.map(|x| -x), a, config.num_samples)?;
    let values = DMatrix::from_fn(grid.nrows(), grid.ncols(), |i, b| {
        let t = grid[(i, b)];
        let base = (alpha - 1.0) * (-tau[b] - t * t / (2.0 * sigma_sq[b]));
        base.max(0.0).powf(exponent)
    });
    trapz_columns(&values, &grid)
}

/// Numeric mass `∫ p(t) dt` of a density.
///
/// Compactly supported densities are integrated over their support; the
/// Gaussian over `μ ± 12σ`.
pub fn mass(
    density: &dyn EntmaxDensity,
    params: &KernelParameters,
    config: &QuadratureConfig,
) -> Result<DVector<f64>> {
    let (lo, hi) = match params.sigma_sq() {
        Ok(sigma_sq) if params.half_width().iter().any(|a| a.is_infinite()) => {
            let half = sigma_sq.map(|s| GAUSSIAN_WINDOW * s.sqrt());
            (params.mu() - &half, params.mu() + &half)
        }
        _ => params.support(),
    };
    let grid = linspace_batch(&lo, &hi, config.num_samples)?;
    trapz_columns(&density.pdf(&grid)?, &grid)
}

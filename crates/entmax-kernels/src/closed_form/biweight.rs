//! Biweight kernel (α = 3/2): `p(t) = ¼ q(t)²` with
//! `q(t) = -τ - (t - μ)²/(2σ²)` on the support

use super::quadratic;
use crate::params::KernelParameters;
use entmax_core::Result;
use nalgebra::DVector;

/// `(α - 1)²`
const SCALE: f64 = 0.25;

/// `[c0, ..., c4]` of `¼ (A + B t + C t²)²`
pub fn coefficients(params: &KernelParameters) -> Result<Vec<DVector<f64>>> {
    let [a, b, c] = quadratic(params)?;
    let n = a.len();
    let coefficient = |f: &dyn Fn(f64, f64, f64) -> f64| {
        DVector::from_fn(n, |i, _| SCALE * f(a[i], b[i], c[i]))
    };
    Ok(vec![
        coefficient(&|a, _, _| a * a),
        coefficient(&|a, b, _| 2.0 * a * b),
        coefficient(&|a, b, c| b * b + 2.0 * a * c),
        coefficient(&|_, b, c| 2.0 * b * c),
        coefficient(&|_, _, c| c * c),
    ])
}

/// `‖p‖_{1/2}^{1/2} = ∫ ½ q(t) dt = -τ a - a³/(6σ²)`
pub fn escort_normalizer(params: &KernelParameters) -> Result<DVector<f64>> {
    let tau = params.tau()?;
    let sigma_sq = params.sigma_sq()?;
    let a = params.half_width();
    Ok(DVector::from_fn(a.len(), |i, _| {
        -tau[i] * a[i] - a[i].powi(3) / (6.0 * sigma_sq[i])
    }))
}

//! Triweight kernel (α = 4/3): `p(t) = q(t)³/27` with
//! `q(t) = -τ - (t - μ)²/(2σ²)` on the support
//!
//! Only `E[ψ]` has a closed form here; the `t` moments would need basis
//! integrals of `t^7` and `t^8`.

use super::quadratic;
use crate::params::KernelParameters;
use entmax_core::Result;
use nalgebra::DVector;

/// `(α - 1)³`
const SCALE: f64 = 1.0 / 27.0;

/// `[c0, ..., c6]` of `(A + B t + C t²)³ / 27`
pub fn coefficients(params: &KernelParameters) -> Result<Vec<DVector<f64>>> {
    let [a, b, c] = quadratic(params)?;
    let n = a.len();
    let coefficient = |f: &dyn Fn(f64, f64, f64) -> f64| {
        DVector::from_fn(n, |i, _| SCALE * f(a[i], b[i], c[i]))
    };
    Ok(vec![
        coefficient(&|a, _, _| a.powi(3)),
        coefficient(&|a, b, _| 3.0 * a * a * b),
        coefficient(&|a, b, c| 3.0 * a * a * c + 3.0 * a * b * b),
        coefficient(&|a, b, c| b.powi(3) + 6.0 * a * b * c),
        coefficient(&|a, b, c| 3.0 * a * c * c + 3.0 * b * b * c),
        coefficient(&|_, b, c| 3.0 * b * c * c),
        coefficient(&|_, _, c| c.powi(3)),
    ])
}

/// `‖p‖_{2/3}^{2/3} = ∫ q(t)²/9 dt`
/// `= (2τ² a + 2τ a³/(3σ²) + a⁵/(10σ⁴)) / 9`
pub fn escort_normalizer(params: &KernelParameters) -> Result<DVector<f64>> {
    let tau = params.tau()?;
    let sigma_sq = params.sigma_sq()?;
    let a = params.half_width();
    Ok(DVector::from_fn(a.len(), |i, _| {
        let (t, s, a) = (tau[i], sigma_sq[i], a[i]);
        (2.0 * t * t * a + 2.0 * t * a.powi(3) / (3.0 * s) + a.powi(5) / (10.0 * s * s)) / 9.0
    }))
}

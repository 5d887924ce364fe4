//! Sparsemax kernel (α = 2): `p(t) = -τ - (t - μ)²/(2σ²)` on the support

use super::quadratic;
use crate::params::KernelParameters;
use entmax_core::Result;
use nalgebra::DVector;

/// `[c0, c1, c2]` with `p(t) = c0 + c1 t + c2 t²`
pub fn coefficients(params: &KernelParameters) -> Result<Vec<DVector<f64>>> {
    let [c0, c1, c2] = quadratic(params)?;
    Ok(vec![c0, c1, c2])
}

/// `‖p‖_0^0`: the length `2a` of the support
pub fn escort_normalizer(params: &KernelParameters) -> DVector<f64> {
    params.support_size()
}

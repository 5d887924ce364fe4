//! Gaussian kernel: expectations through Gaussian-weighted basis integrals

use crate::params::KernelParameters;
use entmax_basis::BasisFunctions;
use entmax_core::Result;
use nalgebra::{DMatrix, DVector};

/// `∫ t^power ψ(t) N(t; μ, σ²) dt`
pub fn expectation<B>(params: &KernelParameters, power: usize, psi: &B) -> Result<DMatrix<f64>>
where
    B: BasisFunctions + ?Sized,
{
    psi.integrate_t_pow_times_psi_gaussian(power, params.mu(), params.sigma_sq()?)
}

/// `‖p‖_1 = 1`: the Gaussian is its own escort
pub fn escort_normalizer(params: &KernelParameters) -> DVector<f64> {
    DVector::from_element(params.batch_size(), 1.0)
}

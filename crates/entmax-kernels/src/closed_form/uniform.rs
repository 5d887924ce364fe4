//! Uniform kernel: constant density `1/(2a)` on the support

use crate::params::KernelParameters;
use nalgebra::DVector;

pub fn coefficients(params: &KernelParameters) -> Vec<DVector<f64>> {
    vec![params.half_width().map(|a| 1.0 / (2.0 * a))]
}

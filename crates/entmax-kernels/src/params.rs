//! Batched kernel parameters

use entmax_core::{Error, Result};
use nalgebra::DVector;

/// Parameters of a kernel after `set_parameters`.
///
/// `mu`, `a` and (when present) `sigma_sq` and `tau` share the batch size.
/// The uniform family has neither σ² nor τ; the Gaussian has `a = ∞`.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelParameters {
    pub(crate) mu: DVector<f64>,
    pub(crate) sigma_sq: Option<DVector<f64>>,
    pub(crate) tau: Option<DVector<f64>>,
    pub(crate) a: DVector<f64>,
    pub(crate) alpha: f64,
}

impl KernelParameters {
    pub fn mu(&self) -> &DVector<f64> {
        &self.mu
    }

    pub fn sigma_sq(&self) -> Result<&DVector<f64>> {
        self.sigma_sq
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("kernel has no sigma_sq".to_string()))
    }

    pub fn tau(&self) -> Result<&DVector<f64>> {
        self.tau
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("kernel has no tau".to_string()))
    }

    /// Support half-width `a`
    pub fn half_width(&self) -> &DVector<f64> {
        &self.a
    }

    pub fn support_size(&self) -> DVector<f64> {
        &self.a * 2.0
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn batch_size(&self) -> usize {
        self.mu.len()
    }

    /// Support endpoints `(mu - a, mu + a)`
    pub fn support(&self) -> (DVector<f64>, DVector<f64>) {
        (&self.mu - &self.a, &self.mu + &self.a)
    }
}

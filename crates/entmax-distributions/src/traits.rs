//! The distribution contract used by entmax kernels

use entmax_core::{check_batch, check_positive, Error, Result};
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// A batched one-dimensional α-entmax density.
///
/// Every batched quantity has the same length `B` as the `mu` passed to
/// [`set_parameters`](EntmaxDensity::set_parameters). Densities are
/// evaluated on `M x B` grids where column `b` uses parameters `b`.
pub trait EntmaxDensity: Send + Sync + fmt::Debug {
    /// The entmax exponent α (1 for Gaussian, ∞ for uniform)
    fn alpha(&self) -> f64;

    /// Name of this distribution for debugging/logging
    fn name(&self) -> &'static str;

    /// Set the location and one scale parameter.
    ///
    /// Exactly one of `sigma_sq` and `support_size` is authoritative; the
    /// other is derived.
    fn set_parameters(
        &mut self,
        mu: &DVector<f64>,
        sigma_sq: Option<&DVector<f64>>,
        support_size: Option<&DVector<f64>>,
    ) -> Result<()>;

    fn mu(&self) -> Result<&DVector<f64>>;

    fn sigma_sq(&self) -> Result<&DVector<f64>>;

    /// The threshold τ of the density
    fn tau(&self) -> Result<&DVector<f64>>;

    /// Width `2a` of the support (infinite for the Gaussian)
    fn support_size(&self) -> Result<DVector<f64>>;

    fn mean(&self) -> Result<DVector<f64>> {
        Ok(self.mu()?.clone())
    }

    fn variance(&self) -> Result<DVector<f64>>;

    /// Density values on an `M x B` grid
    fn pdf(&self, points: &DMatrix<f64>) -> Result<DMatrix<f64>>;

    fn sigma_sq_from_variance(&self, variance: &DVector<f64>) -> Result<DVector<f64>>;

    fn sigma_sq_from_support_size(&self, support_size: &DVector<f64>) -> Result<DVector<f64>>;

    fn support_size_from_sigma_sq(&self, sigma_sq: &DVector<f64>) -> Result<DVector<f64>>;
}

/// Parameters shared by every distribution once `set_parameters` succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct BatchParameters {
    pub mu: DVector<f64>,
    pub sigma_sq: DVector<f64>,
    pub tau: DVector<f64>,
    /// Support half-width
    pub a: DVector<f64>,
}

impl BatchParameters {
    pub fn batch_size(&self) -> usize {
        self.mu.len()
    }
}

/// Which scale parameter the caller supplied
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scale<'a> {
    SigmaSq(&'a DVector<f64>),
    SupportSize(&'a DVector<f64>),
}

/// Validate `mu` and pick the single authoritative scale parameter.
pub(crate) fn resolve_scale<'a>(
    family: &str,
    mu: &DVector<f64>,
    sigma_sq: Option<&'a DVector<f64>>,
    support_size: Option<&'a DVector<f64>>,
) -> Result<Scale<'a>> {
    if mu.is_empty() {
        return Err(Error::InvalidInput(format!("{family}: mu must not be empty")));
    }
    if mu.iter().any(|m| !m.is_finite()) {
        return Err(Error::non_finite("mu"));
    }
    match (sigma_sq, support_size) {
        (Some(sigma_sq), None) => {
            check_batch(sigma_sq, mu.len(), "sigma_sq")?;
            check_positive(sigma_sq, "sigma_sq")?;
            Ok(Scale::SigmaSq(sigma_sq))
        }
        (None, Some(support_size)) => {
            check_batch(support_size, mu.len(), "support_size")?;
            check_positive(support_size, "support_size")?;
            Ok(Scale::SupportSize(support_size))
        }
        (Some(_), Some(_)) => Err(Error::InvalidParameter(format!(
            "{family}: pass either sigma_sq or support_size, not both"
        ))),
        (None, None) => Err(Error::InvalidParameter(format!(
            "{family}: one of sigma_sq or support_size is required"
        ))),
    }
}

/// Check a grid has one column per batch element.
pub(crate) fn check_grid(points: &DMatrix<f64>, batch: usize) -> Result<()> {
    if points.ncols() != batch {
        return Err(Error::size_mismatch(batch, points.ncols(), "pdf grid columns"));
    }
    Ok(())
}

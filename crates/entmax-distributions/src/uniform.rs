//! The uniform (α = ∞) limit of the entmax family

use crate::traits::{check_grid, resolve_scale, EntmaxDensity, Scale};
use entmax_core::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Batched uniform distribution on `[μ - a, μ + a]`.
///
/// Only the support size is meaningful; there is no σ² or τ.
#[derive(Debug, Clone, Default)]
pub struct Uniform1D {
    params: Option<(DVector<f64>, DVector<f64>)>,
}

impl Uniform1D {
    pub fn new() -> Self {
        Self { params: None }
    }

    /// `(mu, a)` once parameterized
    fn mu_and_half_width(&self) -> Result<(&DVector<f64>, &DVector<f64>)> {
        self.params
            .as_ref()
            .map(|(mu, a)| (mu, a))
            .ok_or(Error::ParametersNotSet("uniform"))
    }

    /// Support half-width `a`
    pub fn half_width(&self) -> Result<&DVector<f64>> {
        Ok(self.mu_and_half_width()?.1)
    }

    /// The constant density value `1/(2a)`
    pub fn density_value(&self) -> Result<DVector<f64>> {
        Ok(self.half_width()?.map(|a| 1.0 / (2.0 * a)))
    }
}

impl EntmaxDensity for Uniform1D {
    fn alpha(&self) -> f64 {
        f64::INFINITY
    }

    fn name(&self) -> &'static str {
        "uniform"
    }

    fn set_parameters(
        &mut self,
        mu: &DVector<f64>,
        sigma_sq: Option<&DVector<f64>>,
        support_size: Option<&DVector<f64>>,
    ) -> Result<()> {
        match resolve_scale(self.name(), mu, sigma_sq, support_size)? {
            Scale::SupportSize(size) => {
                self.params = Some((mu.clone(), size / 2.0));
                Ok(())
            }
            Scale::SigmaSq(_) => Err(Error::InvalidParameter(
                "uniform is parameterized by support_size, not sigma_sq".to_string(),
            )),
        }
    }

    fn mu(&self) -> Result<&DVector<f64>> {
        Ok(self.mu_and_half_width()?.0)
    }

    fn sigma_sq(&self) -> Result<&DVector<f64>> {
        Err(Error::unsupported(self.name(), "sigma_sq"))
    }

    fn tau(&self) -> Result<&DVector<f64>> {
        Err(Error::unsupported(self.name(), "tau"))
    }

    fn support_size(&self) -> Result<DVector<f64>> {
        Ok(self.half_width()? * 2.0)
    }

    fn variance(&self) -> Result<DVector<f64>> {
        Ok(self.half_width()?.map(|a| a * a / 3.0))
    }

    fn pdf(&self, points: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let (mu, a) = self.mu_and_half_width()?;
        check_grid(points, mu.len())?;
        Ok(DMatrix::from_fn(points.nrows(), points.ncols(), |i, b| {
            if (points[(i, b)] - mu[b]).abs() <= a[b] {
                1.0 / (2.0 * a[b])
            } else {
                0.0
            }
        }))
    }

    fn sigma_sq_from_variance(&self, _variance: &DVector<f64>) -> Result<DVector<f64>> {
        Err(Error::unsupported(self.name(), "sigma_sq_from_variance"))
    }

    fn sigma_sq_from_support_size(&self, _support_size: &DVector<f64>) -> Result<DVector<f64>> {
        Err(Error::unsupported(self.name(), "sigma_sq_from_support_size"))
    }

    fn support_size_from_sigma_sq(&self, _sigma_sq: &DVector<f64>) -> Result<DVector<f64>> {
        Err(Error::unsupported(self.name(), "support_size_from_sigma_sq"))
    }
}

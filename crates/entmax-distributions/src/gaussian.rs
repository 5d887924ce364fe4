//! The Gaussian (α = 1) member of the entmax family

use crate::traits::{check_grid, resolve_scale, BatchParameters, EntmaxDensity, Scale};
use entmax_core::{check_positive, math::normal, Error, Result};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;

/// Batched normal distribution `N(μ, σ²)`.
///
/// Written as an entmax density, `p(t) = exp(-τ - (t-μ)²/(2σ²))` with
/// `τ = ½ ln(2πσ²)`. The support is the whole line.
#[derive(Debug, Clone, Default)]
pub struct Gaussian1D {
    params: Option<BatchParameters>,
}

impl Gaussian1D {
    pub fn new() -> Self {
        Self { params: None }
    }

    pub fn parameters(&self) -> Result<&BatchParameters> {
        self.params.as_ref().ok_or(Error::ParametersNotSet("gaussian"))
    }
}

impl EntmaxDensity for Gaussian1D {
    fn alpha(&self) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn set_parameters(
        &mut self,
        mu: &DVector<f64>,
        sigma_sq: Option<&DVector<f64>>,
        support_size: Option<&DVector<f64>>,
    ) -> Result<()> {
        let sigma_sq = match resolve_scale(self.name(), mu, sigma_sq, support_size)? {
            Scale::SigmaSq(sigma_sq) => sigma_sq.clone(),
            Scale::SupportSize(_) => {
                return Err(Error::InvalidParameter(
                    "gaussian has unbounded support; pass sigma_sq".to_string(),
                ))
            }
        };
        let tau = sigma_sq.map(|s| 0.5 * (2.0 * PI * s).ln());
        let a = DVector::from_element(mu.len(), f64::INFINITY);
        self.params = Some(BatchParameters {
            mu: mu.clone(),
            sigma_sq,
            tau,
            a,
        });
        Ok(())
    }

    fn mu(&self) -> Result<&DVector<f64>> {
        Ok(&self.parameters()?.mu)
    }

    fn sigma_sq(&self) -> Result<&DVector<f64>> {
        Ok(&self.parameters()?.sigma_sq)
    }

    fn tau(&self) -> Result<&DVector<f64>> {
        Ok(&self.parameters()?.tau)
    }

    fn support_size(&self) -> Result<DVector<f64>> {
        Ok(DVector::from_element(self.parameters()?.batch_size(), f64::INFINITY))
    }

    fn variance(&self) -> Result<DVector<f64>> {
        Ok(self.parameters()?.sigma_sq.clone())
    }

    fn pdf(&self, points: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let params = self.parameters()?;
        check_grid(points, params.batch_size())?;
        Ok(DMatrix::from_fn(points.nrows(), points.ncols(), |i, b| {
            normal::pdf(points[(i, b)], params.mu[b], params.sigma_sq[b])
        }))
    }

    fn sigma_sq_from_variance(&self, variance: &DVector<f64>) -> Result<DVector<f64>> {
        check_positive(variance, "variance")?;
        Ok(variance.clone())
    }

    fn sigma_sq_from_support_size(&self, _support_size: &DVector<f64>) -> Result<DVector<f64>> {
        Err(Error::unsupported(self.name(), "sigma_sq_from_support_size"))
    }

    fn support_size_from_sigma_sq(&self, sigma_sq: &DVector<f64>) -> Result<DVector<f64>> {
        check_positive(sigma_sq, "sigma_sq")?;
        Ok(DVector::from_element(sigma_sq.len(), f64::INFINITY))
    }
}

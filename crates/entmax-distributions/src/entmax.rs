//! α-entmax Gaussians with compact support

use crate::traits::{check_grid, resolve_scale, BatchParameters, EntmaxDensity, Scale};
use entmax_core::quadrature::ensure_finite;
use entmax_core::{check_positive, math::entmax::ln_support_constant, Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::trace;

/// One-dimensional α-entmax Gaussian, `α > 1`.
///
/// ```text
/// p(t) = [(α - 1)(-τ - (t - μ)² / (2σ²))]_+^{1/(α-1)}
/// ```
///
/// With `n = 1/(α-1)` the support is `[μ - a, μ + a]` where
/// `a^{2n+1} = (2σ²/(α-1))^n C(n)`, the threshold is `τ = -a²/(2σ²)` and the
/// variance is `a²/(2n+3)`. α = 2 is sparsemax, 3/2 biweight, 4/3 triweight.
#[derive(Debug, Clone)]
pub struct EntmaxGaussian1D {
    alpha: f64,
    params: Option<BatchParameters>,
}

impl EntmaxGaussian1D {
    /// Create an unparameterized distribution
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 1.0 && alpha.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "entmax alpha must be finite and greater than 1, got {alpha}"
            )));
        }
        Ok(Self {
            alpha,
            params: None,
        })
    }

    pub fn sparsemax() -> Self {
        Self {
            alpha: 2.0,
            params: None,
        }
    }

    pub fn biweight() -> Self {
        Self {
            alpha: 1.5,
            params: None,
        }
    }

    pub fn triweight() -> Self {
        Self {
            alpha: 4.0 / 3.0,
            params: None,
        }
    }

    /// The exponent `n = 1/(α-1)` of the density polynomial
    pub fn exponent(&self) -> f64 {
        1.0 / (self.alpha - 1.0)
    }

    pub fn parameters(&self) -> Result<&BatchParameters> {
        self.params
            .as_ref()
            .ok_or(Error::ParametersNotSet("entmax gaussian"))
    }

    /// `ln a = (n ln(2σ²/(α-1)) + ln C(n)) / (2n+1)`
    fn half_width_from_sigma_sq(&self, sigma_sq: f64) -> f64 {
        let n = self.exponent();
        let k = self.alpha - 1.0;
        ((n * (2.0 * sigma_sq / k).ln() + ln_support_constant(n)) / (2.0 * n + 1.0)).exp()
    }

    /// `ln(2σ²/(α-1)) = ((2n+1) ln a - ln C(n)) / n`
    fn sigma_sq_from_half_width(&self, a: f64) -> f64 {
        let n = self.exponent();
        let k = self.alpha - 1.0;
        0.5 * k * (((2.0 * n + 1.0) * a.ln() - ln_support_constant(n)) / n).exp()
    }
}

impl EntmaxDensity for EntmaxGaussian1D {
    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn name(&self) -> &'static str {
        "entmax gaussian"
    }

    fn set_parameters(
        &mut self,
        mu: &DVector<f64>,
        sigma_sq: Option<&DVector<f64>>,
        support_size: Option<&DVector<f64>>,
    ) -> Result<()> {
        let (sigma_sq, a) = match resolve_scale(self.name(), mu, sigma_sq, support_size)? {
            Scale::SigmaSq(sigma_sq) => {
                let a = sigma_sq.map(|s| self.half_width_from_sigma_sq(s));
                (sigma_sq.clone(), a)
            }
            Scale::SupportSize(size) => {
                let a = size / 2.0;
                (a.map(|a| self.sigma_sq_from_half_width(a)), a)
            }
        };
        let tau = a.zip_map(&sigma_sq, |a, s| -a * a / (2.0 * s));
        ensure_finite(
            a.iter().chain(sigma_sq.iter()).chain(tau.iter()),
            "derived entmax parameters",
        )?;
        trace!(alpha = self.alpha, batch = mu.len(), "entmax parameters set");

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
        Ok(&self.parameters()?.a * 2.0)
    }

    fn variance(&self) -> Result<DVector<f64>> {
        let n = self.exponent();
        Ok(self.parameters()?.a.map(|a| a * a / (2.0 * n + 3.0)))
    }

    fn pdf(&self, points: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let params = self.parameters()?;
        check_grid(points, params.batch_size())?;
        let k = self.alpha - 1.0;
        let n = self.exponent();
        Ok(DMatrix::from_fn(points.nrows(), points.ncols(), |i, b| {
            let z = points[(i, b)] - params.mu[b];
            let base = k * (-params.tau[b] - z * z / (2.0 * params.sigma_sq[b]));
            if base > 0.0 {
                base.powf(n)
            } else {
                0.0
            }
        }))
    }

    fn sigma_sq_from_variance(&self, variance: &DVector<f64>) -> Result<DVector<f64>> {
        check_positive(variance, "variance")?;
        let n = self.exponent();
        Ok(variance.map(|v| self.sigma_sq_from_half_width(((2.0 * n + 3.0) * v).sqrt())))
    }

    fn sigma_sq_from_support_size(&self, support_size: &DVector<f64>) -> Result<DVector<f64>> {
        check_positive(support_size, "support_size")?;
        Ok(support_size.map(|s| self.sigma_sq_from_half_width(s / 2.0)))
    }

    fn support_size_from_sigma_sq(&self, sigma_sq: &DVector<f64>) -> Result<DVector<f64>> {
        check_positive(sigma_sq, "sigma_sq")?;
        Ok(sigma_sq.map(|s| 2.0 * self.half_width_from_sigma_sq(s)))
    }
}

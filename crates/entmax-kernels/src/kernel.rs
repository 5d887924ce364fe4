//! The expectation engine

use crate::closed_form::{self, biweight, gaussian, sparsemax, triweight, uniform};
use crate::escort::Escort;
use crate::family::{EscortRule, KernelFamily, Moment};
use crate::numeric;
use crate::params::KernelParameters;
use entmax_basis::BasisFunctions;
use entmax_core::quadrature::ensure_finite;
use entmax_core::{Error, QuadratureConfig, Result};
use entmax_distributions::EntmaxDensity;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument, trace};

/// A batched entmax Gaussian kernel.
///
/// A kernel is created empty, parameterized with
/// [`set_parameters`](Self::set_parameters), and then integrates basis
/// functions against its density. Every batched input and output shares
/// the batch size `B` of `mu`; expectations against a basis with `P`
/// functions are `B x P`.
///
/// # Example
///
/// ```rust
/// use entmax_basis::PowerBasis;
/// use entmax_kernels::EntmaxKernel;
/// use nalgebra::DVector;
///
/// let kernel = EntmaxKernel::uniform()
///     .with_parameters(
///         &DVector::from_vec(vec![0.0]),
///         None,
///         Some(&DVector::from_vec(vec![2.0])),
///     )
///     .unwrap();
/// let attention = kernel.attention(&PowerBasis::constant()).unwrap();
/// assert!((attention[(0, 0)] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct EntmaxKernel {
    family: KernelFamily,
    config: QuadratureConfig,
    density: Box<dyn EntmaxDensity>,
    params: Option<KernelParameters>,
    escort: Escort,
}

impl EntmaxKernel {
    /// Create an unparameterized kernel with the default quadrature settings
    pub fn new(family: KernelFamily) -> Result<Self> {
        Self::with_config(family, QuadratureConfig::default())
    }

    /// Create an unparameterized kernel with explicit quadrature settings
    pub fn with_config(family: KernelFamily, config: QuadratureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(family, config, family.density()?))
    }

    pub fn uniform() -> Self {
        Self::assemble(
            KernelFamily::Uniform,
            QuadratureConfig::default(),
            Box::new(entmax_distributions::Uniform1D::new()),
        )
    }

    pub fn gaussian() -> Self {
        Self::assemble(
            KernelFamily::Gaussian,
            QuadratureConfig::default(),
            Box::new(entmax_distributions::Gaussian1D::new()),
        )
    }

    pub fn sparsemax() -> Self {
        Self::assemble(
            KernelFamily::Sparsemax,
            QuadratureConfig::default(),
            Box::new(entmax_distributions::EntmaxGaussian1D::sparsemax()),
        )
    }

    pub fn biweight() -> Self {
        Self::assemble(
            KernelFamily::Biweight,
            QuadratureConfig::default(),
            Box::new(entmax_distributions::EntmaxGaussian1D::biweight()),
        )
    }

    pub fn triweight() -> Self {
        Self::assemble(
            KernelFamily::Triweight,
            QuadratureConfig::default(),
            Box::new(entmax_distributions::EntmaxGaussian1D::triweight()),
        )
    }

    /// Generic α-entmax kernel integrated numerically
    pub fn entmax(alpha: f64) -> Result<Self> {
        Self::new(KernelFamily::entmax(alpha)?)
    }

    fn assemble(
        family: KernelFamily,
        config: QuadratureConfig,
        density: Box<dyn EntmaxDensity>,
    ) -> Self {
        Self {
            family,
            config,
            density,
            params: None,
            escort: Escort::None,
        }
    }

    /// Builder form of [`set_parameters`](Self::set_parameters) with the
    /// escort enabled
    pub fn with_parameters(
        mut self,
        mu: &DVector<f64>,
        sigma_sq: Option<&DVector<f64>>,
        support_size: Option<&DVector<f64>>,
    ) -> Result<Self> {
        self.set_parameters(mu, sigma_sq, support_size, true)?;
        Ok(self)
    }

    pub fn family(&self) -> KernelFamily {
        self.family
    }

    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    pub fn parameters(&self) -> Result<&KernelParameters> {
        self.params
            .as_ref()
            .ok_or(Error::ParametersNotSet(self.family.name()))
    }

    /// Set `mu` and exactly one of `sigma_sq` and `support_size`.
    ///
    /// σ², the support, τ and the escort are all re-derived. On error the
    /// kernel keeps its previous state.
    #[instrument(skip_all, fields(family = %self.family, batch = mu.len(), use_escort = use_escort))]
    pub fn set_parameters(
        &mut self,
        mu: &DVector<f64>,
        sigma_sq: Option<&DVector<f64>>,
        support_size: Option<&DVector<f64>>,
        use_escort: bool,
    ) -> Result<()> {
        let mut density = self.family.density()?;
        density.set_parameters(mu, sigma_sq, support_size)?;
        let params = self.derive_parameters(density.as_ref())?;

        let escort = if self.family == KernelFamily::Gaussian {
            Escort::SelfDual
        } else if use_escort {
            self.escort_for(&params)?
        } else {
            Escort::None
        };

        self.density = density;
        self.params = Some(params);
        self.escort = escort;
        Ok(())
    }

    fn derive_parameters(&self, density: &dyn EntmaxDensity) -> Result<KernelParameters> {
        let (sigma_sq, tau) = match self.family {
            KernelFamily::Uniform => (None, None),
            _ => (Some(density.sigma_sq()?.clone()), Some(density.tau()?.clone())),
        };
        Ok(KernelParameters {
            mu: density.mu()?.clone(),
            sigma_sq,
            tau,
            a: density.support_size()? / 2.0,
            alpha: self.family.alpha(),
        })
    }

    /// Build the escort for the current parameters.
    ///
    /// The escort shares `mu` and the support size and carries no escort of
    /// its own.
    pub fn build_escort(&self) -> Result<Escort> {
        self.escort_for(self.parameters()?)
    }

    fn escort_for(&self, params: &KernelParameters) -> Result<Escort> {
        match self.family.escort_rule()? {
            EscortRule::None => Ok(Escort::None),
            EscortRule::SelfDual => Ok(Escort::SelfDual),
            EscortRule::Family(family) => {
                debug!(parent = %self.family, escort = %family, "building escort");
                let mut kernel = Self::with_config(family, self.config)?;
                kernel.set_parameters(&params.mu, None, Some(&params.support_size()), false)?;
                Ok(Escort::Kernel(Box::new(kernel)))
            }
        }
    }

    /// The escort kernel, the kernel itself for a self-dual family
    pub fn escort(&self) -> Option<&EntmaxKernel> {
        self.escort.resolve(self)
    }

    /// `‖p‖_β^β` with `β = 2 - α`, the scale of the escort gradient.
    pub fn escort_normalizer(&self) -> Result<DVector<f64>> {
        let params = self.parameters()?;
        match self.family {
            KernelFamily::Uniform => Err(Error::unsupported(self.family.name(), "escort_normalizer")),
            KernelFamily::Gaussian => Ok(gaussian::escort_normalizer(params)),
            KernelFamily::Sparsemax => Ok(sparsemax::escort_normalizer(params)),
            KernelFamily::Biweight => biweight::escort_normalizer(params),
            KernelFamily::Triweight => triweight::escort_normalizer(params),
            KernelFamily::Entmax(alpha) => {
                numeric::escort_normalizer(params, alpha, self.family.escort_alpha()?, &self.config)
            }
        }
    }

    pub fn mean(&self) -> Result<DVector<f64>> {
        self.density.mean()
    }

    pub fn variance(&self) -> Result<DVector<f64>> {
        self.density.variance()
    }

    pub fn support_size(&self) -> Result<DVector<f64>> {
        self.density.support_size()
    }

    pub fn sigma_sq_from_variance(&self, variance: &DVector<f64>) -> Result<DVector<f64>> {
        self.density.sigma_sq_from_variance(variance)
    }

    pub fn sigma_sq_from_support_size(&self, support_size: &DVector<f64>) -> Result<DVector<f64>> {
        self.density.sigma_sq_from_support_size(support_size)
    }

    pub fn support_size_from_sigma_sq(&self, sigma_sq: &DVector<f64>) -> Result<DVector<f64>> {
        self.density.support_size_from_sigma_sq(sigma_sq)
    }

    /// Density values on an `M x B` grid
    pub fn pdf(&self, points: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        self.density.pdf(points)
    }

    /// `E[t] = μ`
    pub fn expectation_t(&self) -> Result<DVector<f64>> {
        Ok(self.parameters()?.mu().clone())
    }

    /// `E[t²] = Var[t] + μ²`
    pub fn expectation_t2(&self) -> Result<DVector<f64>> {
        let mu = self.parameters()?.mu();
        Ok(self.variance()? + mu.component_mul(mu))
    }

    /// Coefficients `c_j` of the density `Σ_j c_j t^j` on the support.
    ///
    /// Only the polynomial families have one.
    pub fn density_coefficients(&self) -> Result<Vec<DVector<f64>>> {
        let params = self.parameters()?;
        match self.family {
            KernelFamily::Uniform => Ok(uniform::coefficients(params)),
            KernelFamily::Sparsemax => sparsemax::coefficients(params),
            KernelFamily::Biweight => biweight::coefficients(params),
            KernelFamily::Triweight => triweight::coefficients(params),
            KernelFamily::Gaussian | KernelFamily::Entmax(_) => {
                Err(Error::unsupported(self.family.name(), "density_coefficients"))
            }
        }
    }

    /// `E[t^k ψ(t)]` for one of the three moments.
    pub fn expectation<B>(&self, moment: Moment, psi: &B) -> Result<DMatrix<f64>>
    where
        B: BasisFunctions + ?Sized,
    {
        if !self.family.supports(moment) {
            return Err(Error::unsupported(self.family.name(), moment.operation()));
        }
        let params = self.parameters()?;
        let power = moment.power();
        trace!(
            family = %self.family,
            basis = psi.name(),
            batch = params.batch_size(),
            functions = psi.len(),
            power,
            "expectation"
        );

        let result = match self.family {
            KernelFamily::Gaussian => gaussian::expectation(params, power, psi)?,
            KernelFamily::Entmax(_) => {
                numeric::expectation(self.density.as_ref(), params, power, psi, &self.config)?
            }
            _ => closed_form::polynomial_expectation(&self.density_coefficients()?, power, params, psi)?,
        };
        ensure_finite(result.iter(), moment.operation())?;
        Ok(result)
    }

    pub fn expectation_psi<B>(&self, psi: &B) -> Result<DMatrix<f64>>
    where
        B: BasisFunctions + ?Sized,
    {
        self.expectation(Moment::Psi, psi)
    }

    pub fn expectation_t_times_psi<B>(&self, psi: &B) -> Result<DMatrix<f64>>
    where
        B: BasisFunctions + ?Sized,
    {
        self.expectation(Moment::TTimesPsi, psi)
    }

    pub fn expectation_t2_times_psi<B>(&self, psi: &B) -> Result<DMatrix<f64>>
    where
        B: BasisFunctions + ?Sized,
    {
        self.expectation(Moment::T2TimesPsi, psi)
    }

    /// The kernel's attention output `E[ψ(t)]`
    pub fn attention<B>(&self, psi: &B) -> Result<DMatrix<f64>>
    where
        B: BasisFunctions + ?Sized,
    {
        self.expectation_psi(psi)
    }

    /// Gradient of [`attention`](Self::attention) with respect to the two
    /// natural parameters, through the escort distribution `q`:
    ///
    /// ```text
    /// g1 = Z (E_q[t ψ]  - E_q[t]  E_q[ψ])
    /// g2 = Z (E_q[t² ψ] - E_q[t²] E_q[ψ])
    /// ```
    ///
    /// where `Z` is [`escort_normalizer`](Self::escort_normalizer).
    #[instrument(skip_all, fields(family = %self.family))]
    pub fn attention_gradient<B>(&self, psi: &B) -> Result<(DMatrix<f64>, DMatrix<f64>)>
    where
        B: BasisFunctions + ?Sized,
    {
        if self.family.escort_rule()? == EscortRule::None {
            return Err(Error::unsupported(self.family.name(), "attention_gradient"));
        }
        self.parameters()?;
        let escort = self.escort().ok_or_else(|| {
            Error::InvalidParameter(format!(
                "{} kernel was parameterized without an escort",
                self.family
            ))
        })?;

        let z = self.escort_normalizer()?;
        let e_psi = escort.expectation_psi(psi)?;
        let e_t = escort.expectation_t()?;
        let e_t2 = escort.expectation_t2()?;

        let g1 = escort.expectation_t_times_psi(psi)? - closed_form::scale_rows(e_psi.clone(), &e_t);
        let g2 = escort.expectation_t2_times_psi(psi)? - closed_form::scale_rows(e_psi, &e_t2);
        Ok((
            closed_form::scale_rows(g1, &z),
            closed_form::scale_rows(g2, &z),
        ))
    }

    /// Integrate the density numerically and compare its mass to one.
    ///
    /// Fails with `NumericInstability` when any batch element is off by more
    /// than `config.tolerance`; otherwise returns the masses.
    pub fn check_normalization(&self) -> Result<DVector<f64>> {
        let mass = numeric::mass(self.density.as_ref(), self.parameters()?, &self.config)?;
        if let Some((b, m)) = mass
            .iter()
            .enumerate()
            .find(|(_, m)| (*m - 1.0).abs() > self.config.tolerance)
        {
            return Err(Error::NumericInstability(format!(
                "{} density has mass {m} at batch index {b}",
                self.family
            )));
        }
        Ok(mass)
    }
}

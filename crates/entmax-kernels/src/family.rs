//! The closed set of kernel families and their static tables

use entmax_core::{Error, Result};
use entmax_distributions::{EntmaxDensity, EntmaxGaussian1D, Gaussian1D, Uniform1D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kernel families.
///
/// The five named families have closed-form expectations. `Entmax(α)` is
/// the generic α-entmax Gaussian whose expectations go through the
/// trapezoidal fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KernelFamily {
    /// α = ∞
    Uniform,
    /// α = 1
    Gaussian,
    /// α = 2
    Sparsemax,
    /// α = 3/2
    Biweight,
    /// α = 4/3
    Triweight,
    /// Any α > 1, integrated numerically
    Entmax(f64),
}

/// How a family obtains its (2 - α)-escort distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EscortRule {
    /// No escort: the family is the base case of the recursion
    None,
    /// The escort is the kernel itself
    SelfDual,
    /// The escort is a kernel of another family with the same support
    Family(KernelFamily),
}

/// The three moments a kernel integrates against a basis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Moment {
    /// `E[ψ(t)]`
    Psi,
    /// `E[t ψ(t)]`
    TTimesPsi,
    /// `E[t² ψ(t)]`
    T2TimesPsi,
}

impl Moment {
    /// Exponent of `t` in the integrand
    pub fn power(self) -> usize {
        match self {
            Self::Psi => 0,
            Self::TTimesPsi => 1,
            Self::T2TimesPsi => 2,
        }
    }

    /// Operation name used in errors and logs
    pub fn operation(self) -> &'static str {
        match self {
            Self::Psi => "expectation_psi",
            Self::TTimesPsi => "expectation_t_times_psi",
            Self::T2TimesPsi => "expectation_t2_times_psi",
        }
    }
}

impl KernelFamily {
    /// Validated generic family
    pub fn entmax(alpha: f64) -> Result<Self> {
        if !(alpha > 1.0 && alpha.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "entmax kernel alpha must be finite and greater than 1, got {alpha}"
            )));
        }
        Ok(Self::Entmax(alpha))
    }

    /// The entmax exponent α
    pub fn alpha(&self) -> f64 {
        match self {
            Self::Uniform => f64::INFINITY,
            Self::Gaussian => 1.0,
            Self::Sparsemax => 2.0,
            Self::Biweight => 1.5,
            Self::Triweight => 4.0 / 3.0,
            Self::Entmax(alpha) => *alpha,
        }
    }

    /// Name of this family for debugging/logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Gaussian => "gaussian",
            Self::Sparsemax => "sparsemax",
            Self::Biweight => "biweight",
            Self::Triweight => "triweight",
            Self::Entmax(_) => "entmax",
        }
    }

    /// Degree in `t` of the density polynomial on the support, for the
    /// families that expand their density as a polynomial.
    pub fn density_degree(&self) -> Option<usize> {
        match self {
            Self::Uniform => Some(0),
            Self::Sparsemax => Some(2),
            Self::Biweight => Some(4),
            Self::Triweight => Some(6),
            Self::Gaussian | Self::Entmax(_) => None,
        }
    }

    /// Whether `moment` is implemented for this family.
    ///
    /// Triweight only has `E[ψ]`: its `t` moments would need `t^7` and
    /// `t^8` basis integrals.
    pub fn supports(&self, moment: Moment) -> bool {
        !matches!((self, moment), (Self::Triweight, Moment::TTimesPsi | Moment::T2TimesPsi))
    }

    /// The escort of the `α`-entmax is the `1/(2-α)`-entmax.
    ///
    /// `α = 2` is the limit `1/(2-α) → ∞`, i.e. the uniform distribution;
    /// `α > 2` has no escort in the family.
    pub fn escort_rule(&self) -> Result<EscortRule> {
        Ok(match self {
            Self::Uniform => EscortRule::None,
            Self::Gaussian => EscortRule::SelfDual,
            Self::Sparsemax => EscortRule::Family(Self::Uniform),
            Self::Biweight => EscortRule::Family(Self::Sparsemax),
            Self::Triweight => EscortRule::Family(Self::Biweight),
            Self::Entmax(alpha) => EscortRule::Family(Self::escort_of(*alpha)?),
        })
    }

    fn escort_of(alpha: f64) -> Result<Self> {
        if alpha == 2.0 {
            return Ok(Self::Uniform);
        }
        if alpha > 2.0 {
            return Err(Error::DegenerateParameter(format!(
                "alpha = {alpha} > 2 has no (2 - alpha)-escort"
            )));
        }
        Self::entmax(1.0 / (2.0 - alpha))
    }

    /// Escort exponent `1/(2-α)`, infinite at `α = 2`.
    pub fn escort_alpha(&self) -> Result<f64> {
        match self.escort_rule()? {
            EscortRule::None => Err(Error::unsupported(self.name(), "escort_alpha")),
            EscortRule::SelfDual => Ok(self.alpha()),
            EscortRule::Family(family) => Ok(family.alpha()),
        }
    }

    /// Fresh, unparameterized distribution object for this family
    pub fn density(&self) -> Result<Box<dyn EntmaxDensity>> {
        Ok(match self {
            Self::Uniform => Box::new(Uniform1D::new()),
            Self::Gaussian => Box::new(Gaussian1D::new()),
            Self::Sparsemax => Box::new(EntmaxGaussian1D::sparsemax()),
            Self::Biweight => Box::new(EntmaxGaussian1D::biweight()),
            Self::Triweight => Box::new(EntmaxGaussian1D::triweight()),
            Self::Entmax(alpha) => Box::new(EntmaxGaussian1D::new(*alpha)?),
        })
    }
}

impl fmt::Display for KernelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entmax(alpha) => write!(f, "entmax(alpha={alpha})"),
            other => f.write_str(other.name()),
        }
    }
}

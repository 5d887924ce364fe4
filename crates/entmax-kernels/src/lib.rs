//! Entmax Gaussian kernels for continuous attention
//!
//! An [`EntmaxKernel`] computes the moments
//!
//! ```text
//! E[ψ(t)],  E[t ψ(t)],  E[t² ψ(t)]
//! ```
//!
//! of a batched one-dimensional α-entmax density against a basis ψ, and
//! the gradient of the attention output `E[ψ]` through the kernel's
//! (2 - α)-escort distribution.
//!
//! # Families
//!
//! | Family | α | Expectations | Escort |
//! |--------|---|--------------|--------|
//! | Uniform | ∞ | closed form, degree 0 | none |
//! | Gaussian | 1 | Gaussian-weighted basis integrals | itself |
//! | Sparsemax | 2 | closed form, degree 2 | Uniform |
//! | Biweight | 3/2 | closed form, degree 4 | Sparsemax |
//! | Triweight | 4/3 | closed form, degree 6, `E[ψ]` only | Biweight |
//! | `Entmax(α)` | α | trapezoidal fallback | `Entmax(1/(2-α))` |
//!
//! The polynomial families write their density on the support as
//! `Σ_j c_j t^j` and reduce every moment to the basis' analytic
//! `∫ t^k ψ(t) dt` menu. The generic family integrates on a fixed grid
//! configured by [`QuadratureConfig`](entmax_core::QuadratureConfig).
//!
//! # Example
//!
//! ```rust
//! use entmax_basis::GaussianBasis;
//! use entmax_kernels::EntmaxKernel;
//! use nalgebra::DVector;
//!
//! let psi = GaussianBasis::evenly_spaced(3, -1.0, 1.0, 0.5).unwrap();
//! let kernel = EntmaxKernel::biweight()
//!     .with_parameters(
//!         &DVector::from_vec(vec![0.0, 0.5]),
//!         Some(&DVector::from_vec(vec![1.0, 0.5])),
//!         None,
//!     )
//!     .unwrap();
//!
//! let attention = kernel.attention(&psi).unwrap();
//! let (g_mean, g_scale) = kernel.attention_gradient(&psi).unwrap();
//! assert_eq!(attention.shape(), (2, 3));
//! assert_eq!(g_mean.shape(), g_scale.shape());
//! ```

pub mod closed_form;
pub mod escort;
pub mod family;
pub mod kernel;
pub mod numeric;
pub mod params;

pub use escort::Escort;
pub use family::{EscortRule, KernelFamily, Moment};
pub use kernel::EntmaxKernel;
pub use params::KernelParameters;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{EntmaxKernel, KernelFamily, Moment};
    pub use entmax_basis::{BasisFunctions, GaussianBasis, PowerBasis};
    pub use entmax_core::{Error, QuadratureConfig, Result};
}

//! # entmax
//!
//! Closed-form moments and escort gradients of entmax Gaussian kernels for
//! continuous attention.
//!
//! This crate re-exports the workspace:
//!
//! - [`entmax_core`]: errors, quadrature grids and Gaussian math
//! - [`entmax_basis`]: the basis functions ψ integrated by kernels
//! - [`entmax_distributions`]: the batched α-entmax densities
//! - [`entmax_kernels`]: the expectation engine and attention gradients
//!
//! ## Quick start
//!
//! ```rust
//! use entmax::prelude::*;
//! use nalgebra::DVector;
//!
//! let mu = DVector::from_vec(vec![0.0, 1.0]);
//! let sigma_sq = DVector::from_vec(vec![1.0, 0.5]);
//! let psi = GaussianBasis::evenly_spaced(4, -2.0, 2.0, 0.5).unwrap();
//!
//! let kernel = EntmaxKernel::sparsemax()
//!     .with_parameters(&mu, Some(&sigma_sq), None)
//!     .unwrap();
//! let attention = kernel.attention(&psi).unwrap();
//! let (g_mean, g_scale) = kernel.attention_gradient(&psi).unwrap();
//! assert_eq!(attention.shape(), (2, 4));
//! assert_eq!(g_mean.shape(), (2, 4));
//! assert_eq!(g_scale.shape(), (2, 4));
//! ```

pub use entmax_basis;
pub use entmax_core;
pub use entmax_distributions;
pub use entmax_kernels;

pub use entmax_core::{Error, QuadratureConfig, Result};
pub use entmax_kernels::{EntmaxKernel, KernelFamily};

/// Prelude module for convenient imports
pub mod prelude {
    pub use entmax_basis::{BasisFunctions, GaussianBasis, PowerBasis};
    pub use entmax_core::{Error, QuadratureConfig, Result};
    pub use entmax_distributions::EntmaxDensity;
    pub use entmax_kernels::{EntmaxKernel, KernelFamily, Moment};
}

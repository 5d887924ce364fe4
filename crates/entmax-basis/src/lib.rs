//! Basis functions for continuous attention
//!
//! A basis `ψ = (ψ_1, ..., ψ_P)` is the value function whose expectation an
//! entmax kernel computes. Kernels never integrate a basis numerically when
//! they can avoid it: each basis exposes a fixed menu of analytic integrals
//!
//! - `∫_u^v t^k ψ(t) dt` for `k = 0..=6` (`integrate_psi`,
//!   `integrate_t_times_psi`, ..., `integrate_t6_times_psi`)
//! - `∫ t^k ψ(t) N(t; μ, σ²) dt` for the Gaussian kernel
//!   (`integrate_psi_gaussian`, `integrate_t_times_psi_gaussian`,
//!   `integrate_t2_times_psi_gaussian`)
//!
//! plus pointwise [`BasisFunctions::evaluate`] for numeric fallbacks.
//!
//! # Example
//!
//! ```rust
//! use entmax_basis::{BasisFunctions, PowerBasis};
//! use nalgebra::DVector;
//!
//! let psi = PowerBasis::constant();
//! let u = DVector::from_vec(vec![-1.0]);
//! let v = DVector::from_vec(vec![1.0]);
//! assert_eq!(psi.integrate_psi(&u, &v).unwrap()[(0, 0)], 2.0);
//! ```

pub mod gaussian;
pub mod power;
pub mod traits;

pub use gaussian::GaussianBasis;
pub use power::PowerBasis;
pub use traits::{BasisFunctions, MAX_MOMENT_POWER};

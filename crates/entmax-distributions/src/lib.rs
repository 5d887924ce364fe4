//! Batched one-dimensional entmax Gaussian distributions
//!
//! The α-entmax Gaussian family interpolates between the Gaussian (α = 1)
//! and the uniform distribution (α → ∞); for α > 1 the density has compact
//! support `[μ - a, μ + a]`.
//!
//! | α | Distribution | Density on the support |
//! |---|--------------|------------------------|
//! | 1 | [`Gaussian1D`] | `exp(-τ - (t-μ)²/2σ²)` |
//! | 4/3 | triweight | cubic in `(t-μ)²` |
//! | 3/2 | biweight | quadratic in `(t-μ)²` |
//! | 2 | sparsemax | linear in `(t-μ)²` |
//! | ∞ | [`Uniform1D`] | `1/(2a)` |
//!
//! All of them implement [`EntmaxDensity`], which kernels use to derive
//! σ², the support and τ, and to evaluate densities on quadrature grids.

pub mod entmax;
pub mod gaussian;
pub mod traits;
pub mod uniform;

pub use entmax::EntmaxGaussian1D;
pub use gaussian::Gaussian1D;
pub use traits::{BatchParameters, EntmaxDensity};
pub use uniform::Uniform1D;

//! Core types for entmax Gaussian kernels
//!
//! This crate provides the pieces every other entmax crate builds on:
//!
//! 1. **Errors** - a single [`Error`] type and [`Result`] alias
//! 2. **Quadrature** - batched evenly spaced grids and the trapezoid rule
//!    used by numeric fallbacks
//! 3. **Math** - Gaussian moments and entmax normalizing constants
//! 4. **Configuration** - [`QuadratureConfig`], the explicit sample count and
//!    tolerance of the numeric fallback
//!
//! # Batch conventions
//!
//! Batched parameters are `DVector<f64>` of length `B`. Grids are
//! `steps x B` matrices, and expectations against a basis with `P`
//! functions are `B x P` matrices.
//!
//! # Example
//!
//! ```rust
//! use entmax_core::quadrature::{linspace_batch, trapz_columns};
//! use nalgebra::DVector;
//!
//! let start = DVector::from_vec(vec![0.0, -1.0]);
//! let end = DVector::from_vec(vec![1.0, 1.0]);
//! let grid = linspace_batch(&start, &end, 1000).unwrap();
//! let areas = trapz_columns(&grid.map(|t| 2.0 * t), &grid).unwrap();
//! assert!((areas[0] - 1.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod quadrature;

// Re-export core types
pub use config::{QuadratureConfig, DEFAULT_NUM_SAMPLES, DEFAULT_TOLERANCE};
pub use error::{Error, Result};
pub use quadrature::{linspace_batch, map_batch, trapz, trapz_columns};

use nalgebra::DVector;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check that a batched parameter has the expected batch size.
pub fn check_batch(values: &DVector<f64>, expected: usize, context: &str) -> Result<()> {
    if values.len() != expected {
        return Err(Error::size_mismatch(expected, values.len(), context));
    }
    Ok(())
}

/// Check that every entry of a batched parameter is positive and finite.
pub fn check_positive(values: &DVector<f64>, name: &str) -> Result<()> {
    match values.iter().find(|v| !(**v > 0.0 && v.is_finite())) {
        Some(&bad) => Err(Error::non_positive(name, bad)),
        None => Ok(()),
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Error, QuadratureConfig, Result};
    pub use crate::quadrature::{linspace_batch, trapz_columns};
}

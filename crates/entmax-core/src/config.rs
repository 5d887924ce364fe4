//! Configuration for numeric integration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default number of grid points for the trapezoidal fallback
pub const DEFAULT_NUM_SAMPLES: usize = 1000;

/// Default accepted deviation between a numeric integral and its exact value
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Settings for the fixed-grid trapezoidal fallback.
///
/// The grid is not adaptive: the trapezoid rule has truncation error
/// `O(h^2)` with `h = width / (num_samples - 1)`, so a larger grid buys
/// precision at linear cost. Closed-form paths never read these settings.
///
/// With 1000 samples a unit-mass entmax density on its own support
/// integrates to within `1e-3` of one for every family with
/// `alpha <= 2`, which is what `tolerance` defaults to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureConfig {
    /// Number of evenly spaced points, both endpoints included
    pub num_samples: usize,
    /// Tolerance used by normalization checks
    pub tolerance: f64,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            num_samples: DEFAULT_NUM_SAMPLES,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl QuadratureConfig {
    /// Create a validated configuration
    pub fn new(num_samples: usize, tolerance: f64) -> Result<Self> {
        let config = Self {
            num_samples,
            tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the sample count
    pub fn with_num_samples(mut self, num_samples: usize) -> Result<Self> {
        self.num_samples = num_samples;
        self.validate()?;
        Ok(self)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.num_samples < 2 {
            return Err(Error::InvalidParameter(format!(
                "Quadrature needs at least 2 samples, got {}",
                self.num_samples
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "Tolerance {} must be positive and finite",
                self.tolerance
            )));
        }
        Ok(())
    }
}

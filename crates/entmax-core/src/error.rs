//! Error types for entmax kernel computations
//!
//! Provides a unified error type for all entmax crates.

use thiserror::Error;

/// Core error type for entmax kernel operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data (shapes, lengths)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A kernel or distribution was queried before `set_parameters`
    #[error("Parameters not set: {0}")]
    ParametersNotSet(&'static str),

    /// The requested operation has no implementation for this family
    #[error("Unsupported operation: {operation} is not available for the {family} kernel")]
    UnsupportedOperation {
        family: String,
        operation: &'static str,
    },

    /// A parameter sits on a limit that needs explicit handling
    #[error("Degenerate parameter: {0}")]
    DegenerateParameter(String),

    /// Quadrature produced a non-finite or out-of-tolerance value
    #[error("Numeric instability: {0}")]
    NumericInstability(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an operation a kernel family does not provide
    pub fn unsupported(family: impl Into<String>, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            family: family.into(),
            operation,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::NumericInstability(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a non-positive batched parameter
    pub fn non_positive(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be positive, got {value}"))
    }
}

//! Error types for ICA operations.
//!
//! Precondition violations are reported before any state is created, so an
//! `Err` from a constructor never leaves a half-initialized engine behind.

use thiserror::Error;

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, IcaError>;

/// Main error type for ICA operations.
#[derive(Error, Debug)]
pub enum IcaError {
    /// A vector does not match the dimension of the cost surface.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the cost surface
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// Invalid hyperparameter value provided.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A caller-supplied initial population has no rows.
    #[error("initial population cannot be empty")]
    EmptyPopulation,

    /// Lower bound exceeds upper bound, or a bound is not finite.
    #[error("invalid bounds at dimension {index}: [{lower}, {upper}]")]
    InvalidBounds {
        /// Dimension index
        index: usize,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// A single optimization run failed inside the harness.
    #[error("run {run} failed: {reason}")]
    RunFailed {
        /// Zero-based run index
        run: usize,
        /// Failure description
        reason: String,
    },

    /// Every run of a harness evaluation failed.
    #[error("none of the {requested} requested runs succeeded")]
    NoSuccessfulRuns {
        /// Number of runs requested
        requested: usize,
    },

    /// I/O error from a decade sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker pool could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl IcaError {
    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_param(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Check that a vector length matches the expected dimension.
    pub fn check_dimension(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, actual })
        }
    }
}

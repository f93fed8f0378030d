//! Error types for filter configuration and execution.
//!
//! Every failure mode is signaled before or at the operation that triggers
//! it: configuration problems at `initialize()`, grid mismatches at the
//! start of `compute()`. Nothing in this crate retries; given a valid
//! configuration and input the pipeline is deterministic, so retrying
//! without changing inputs would not help.

use std::fmt;

/// Result type alias for phase symmetry operations.
pub type PhaseSymmetryResult<T> = Result<T, PhaseSymmetryError>;

/// Error type covering configuration, grid, and transform failures.
#[derive(Debug)]
pub enum PhaseSymmetryError {
    /// A parameter is out of range or inconsistent with the grid.
    Configuration {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Input image grid differs from the grid the filter bank was built for.
    GridMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        context: String,
    },

    /// An operation was called before `initialize()`.
    NotInitialized { operation: String },

    /// The Fourier transform provider could not process the data.
    Transform { context: String },

    /// Failure reading a configuration file.
    Io(std::io::Error),

    /// Failure parsing a configuration file.
    Parse(String),
}

impl fmt::Display for PhaseSymmetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseSymmetryError::Configuration {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid configuration for parameter '{}' = '{}': must satisfy {}",
                    parameter, value, constraint
                )
            }
            PhaseSymmetryError::GridMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Grid mismatch in {}: filter bank was built for extents {:?}, got {:?}",
                    context, expected, got
                )
            }
            PhaseSymmetryError::NotInitialized { operation } => {
                write!(
                    f,
                    "Operation '{}' requires the filter bank to be built first. Call initialize() before computing.",
                    operation
                )
            }
            PhaseSymmetryError::Transform { context } => {
                write!(f, "Fourier transform failed: {}", context)
            }
            PhaseSymmetryError::Io(err) => write!(f, "IO error: {}", err),
            PhaseSymmetryError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for PhaseSymmetryError {}

impl From<std::io::Error> for PhaseSymmetryError {
    fn from(value: std::io::Error) -> Self {
        PhaseSymmetryError::Io(value)
    }
}

// Convenience constructors for common error patterns
impl PhaseSymmetryError {
    /// Create a configuration error.
    pub fn configuration(
        parameter: impl Into<String>,
        value: impl fmt::Display,
        constraint: impl Into<String>,
    ) -> Self {
        PhaseSymmetryError::Configuration {
            parameter: parameter.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Create a grid mismatch error.
    pub fn grid_mismatch(expected: &[usize], got: &[usize], context: impl Into<String>) -> Self {
        PhaseSymmetryError::GridMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
            context: context.into(),
        }
    }

    /// Create a not-initialized error.
    pub fn not_initialized(operation: impl Into<String>) -> Self {
        PhaseSymmetryError::NotInitialized {
            operation: operation.into(),
        }
    }

    /// Create a transform failure error.
    pub fn transform(context: impl Into<String>) -> Self {
        PhaseSymmetryError::Transform {
            context: context.into(),
        }
    }
}

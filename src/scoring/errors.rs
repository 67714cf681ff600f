//! Errors for stress scoring.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Result alias for scoring paths that may produce [`ScoreError`].
pub type ScoreResult<T> = Result<T, ScoreError>;

/// Error type for the stress scorer.
///
/// The scorer accepts any projection whose row count matches the distance
/// matrix, so the only failure modes are shape and finiteness violations.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// Projection row count does not match the distance matrix sample count.
    SampleCountMismatch { expected: usize, actual: usize },

    /// A projection coordinate is NaN/±inf.
    NonFiniteProjection { row: usize },
}

impl std::error::Error for ScoreError {}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::SampleCountMismatch { expected, actual } => {
                write!(f, "Projection must have {expected} rows to match the distance matrix; got {actual}.")
            }
            ScoreError::NonFiniteProjection { row } => {
                write!(f, "Projection row {row} contains a non-finite coordinate.")
            }
        }
    }
}

/// Convert a [`ScoreError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ScoreError> for PyErr {
    fn from(err: ScoreError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

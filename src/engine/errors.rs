//! Errors for the iteration engines and the convergence loop.
//!
//! Backend construction failures are normalized to
//! [`EngineError::ThreadPool`] with a human-readable reason so the estimator
//! can fall back to the sequential engine and report the event as a
//! diagnostic rather than a caller-visible failure.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Result alias for engine construction and sweep-loop paths that may
/// produce [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for the iteration-engine layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    // ---- Backend availability ----
    /// The accelerated backend's thread pool could not be built.
    ThreadPool { reason: String },

    // ---- Run-state validation ----
    /// Projection row count does not match the distance matrix sample count.
    StateMismatch { rows: usize, expected: usize },

    /// Projection column count is outside the supported set {2, 3}.
    BadWidth { cols: usize },
}

impl std::error::Error for EngineError {}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::ThreadPool { reason } => {
                write!(f, "Unable to build the worker thread pool: {reason}")
            }
            EngineError::StateMismatch { rows, expected } => {
                write!(f, "Projection has {rows} rows but the distance matrix holds {expected} samples.")
            }
            EngineError::BadWidth { cols } => {
                write!(f, "Projection must have 2 or 3 columns; got: {cols}")
            }
        }
    }
}

/// Convert an [`EngineError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<EngineError> for PyErr {
    fn from(err: EngineError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for EngineError {
    fn from(err: rayon::ThreadPoolBuildError) -> EngineError {
        EngineError::ThreadPool { reason: err.to_string() }
    }
}

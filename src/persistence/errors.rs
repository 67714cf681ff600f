//! Errors for distance-matrix persistence (binary store and textual reader).
//!
//! I/O and codec failures are normalized into string reasons so the error
//! type stays comparable and cloneable across the estimator surface.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Result alias for persistence paths that may produce [`PersistError`].
pub type PersistResult<T> = Result<T, PersistError>;

/// Error type for saving/loading condensed distance matrices.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistError {
    // ---- Transport ----
    /// Underlying file I/O failed.
    Io { reason: String },

    /// Binary encoding/decoding failed.
    Codec { reason: String },

    // ---- Format validation ----
    /// Stored value count is inconsistent with the stored sample count.
    LengthMismatch { expected: usize, actual: usize },

    /// Textual input violates the upper-triangular line structure.
    Malformed { line: usize, reason: String },

    /// A parsed distance is negative or non-finite.
    InvalidValue { line: usize, value: f64 },
}

impl std::error::Error for PersistError {}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Transport ----
            PersistError::Io { reason } => {
                write!(f, "I/O failure: {reason}")
            }
            PersistError::Codec { reason } => {
                write!(f, "Encoding failure: {reason}")
            }
            // ---- Format validation ----
            PersistError::LengthMismatch { expected, actual } => {
                write!(f, "Stored distance count mismatch: expected {expected}, got {actual}")
            }
            PersistError::Malformed { line, reason } => {
                write!(f, "Malformed distance text at line {line}: {reason}")
            }
            PersistError::InvalidValue { line, value } => {
                write!(f, "Distance at line {line} must be non-negative and finite; got: {value}")
            }
        }
    }
}

/// Convert a [`PersistError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<PersistError> for PyErr {
    fn from(err: PersistError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> PersistError {
        PersistError::Io { reason: err.to_string() }
    }
}

impl From<bincode::Error> for PersistError {
    fn from(err: bincode::Error) -> PersistError {
        PersistError::Codec { reason: err.to_string() }
    }
}

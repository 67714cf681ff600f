//! Errors for Force Scheme projection (configuration checks, distance-matrix
//! construction, fit/transform state, and wrapped lower-layer failures).
//!
//! This module defines the caller-facing error type, [`ProjectionError`],
//! used across the public estimator API and the internal core. It implements
//! `Display`/`Error` and converts to `PyErr` at the PyO3 boundary when the
//! `python-bindings` feature is enabled.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Distances must be **non-negative and finite**; any metric output that
//!   violates this aborts the build as a whole.
//! - Engine, scoring, and persistence failures surface through wrapper
//!   variants with `From` conversions, keeping one result surface at the
//!   estimator level.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

use crate::engine::errors::EngineError;
use crate::persistence::errors::PersistError;
use crate::scoring::errors::ScoreError;

/// Crate-wide result alias for projection operations that may produce
/// [`ProjectionError`].
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Unified error type for Force Scheme projection.
///
/// Covers metric resolution, option validation, distance-matrix
/// construction, fitted-state requirements, and wrapped engine/scoring/
/// persistence failures. Implements `Display`/`Error` and converts to a
/// Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    // ---- Configuration ----
    /// Metric name did not resolve to a registered distance function.
    UnknownMetric { name: String },

    /// Target dimensionality outside the supported set {2, 3}.
    UnsupportedDimensionality { requested: usize },

    /// A numeric option failed validation.
    InvalidOption { name: &'static str, value: f64, reason: &'static str },

    // ---- Input/data validation ----
    /// Fewer than two samples; no pairwise distances exist.
    TooFewSamples { n: usize },

    /// A computed or supplied pairwise distance is negative or non-finite.
    InvalidDistance { i: usize, j: usize, value: f64 },

    /// Precomputed distance input is not a square matrix.
    NotSquare { rows: usize, cols: usize },

    /// Condensed store length does not match `n(n-1)/2` for the sample count.
    LengthMismatch { expected: usize, actual: usize },

    /// A matrix has the wrong number of rows for the fitted sample count.
    RowCountMismatch { expected: usize, actual: usize },

    /// A supplied starting projection has the wrong number of columns.
    ColumnCountMismatch { expected: usize, actual: usize },

    /// The chosen initialization mode needs a matrix the caller did not pass.
    MissingInitial { mode: &'static str },

    /// Fixed-axis override length does not match the sample count.
    FixedAxisLength { expected: usize, actual: usize },

    // ---- Fit/transform state ----
    /// No distance matrix has been built yet.
    NotFitted,

    // ---- Wrapped lower layers ----
    /// Iteration-engine failure.
    Engine(EngineError),

    /// Stress-scorer failure.
    Score(ScoreError),

    /// Persistence failure (I/O, codec, or format).
    Persist(PersistError),
}

impl std::error::Error for ProjectionError {}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            ProjectionError::UnknownMetric { name } => {
                write!(f, "Metric {name:?} is not implemented.")
            }
            ProjectionError::UnsupportedDimensionality { requested } => {
                write!(
                    f,
                    "Projection for dimension {requested} is not supported; only 2 and 3 are."
                )
            }
            ProjectionError::InvalidOption { name, value, reason } => {
                write!(f, "Option {name} must be {reason}; got: {value}")
            }
            // ---- Input/data validation ----
            ProjectionError::TooFewSamples { n } => {
                write!(f, "At least two samples are required; got: {n}")
            }
            ProjectionError::InvalidDistance { i, j, value } => {
                write!(
                    f,
                    "Distance for pair ({i}, {j}) must be non-negative and finite; got: {value}"
                )
            }
            ProjectionError::NotSquare { rows, cols } => {
                write!(f, "Precomputed distance input must be square; got {rows}x{cols}.")
            }
            ProjectionError::LengthMismatch { expected, actual } => {
                write!(f, "Condensed length mismatch: expected {expected}, got {actual}")
            }
            ProjectionError::RowCountMismatch { expected, actual } => {
                write!(f, "Row count mismatch: expected {expected}, got {actual}")
            }
            ProjectionError::ColumnCountMismatch { expected, actual } => {
                write!(f, "Column count mismatch: expected {expected}, got {actual}")
            }
            ProjectionError::MissingInitial { mode } => {
                write!(f, "Initialization mode {mode} requires a matrix argument.")
            }
            ProjectionError::FixedAxisLength { expected, actual } => {
                write!(f, "Fixed-axis length mismatch: expected {expected}, got {actual}")
            }
            // ---- Fit/transform state ----
            ProjectionError::NotFitted => {
                write!(f, "Model hasn't been fitted yet; run fit or load a distance matrix.")
            }
            // ---- Wrapped lower layers ----
            ProjectionError::Engine(err) => {
                write!(f, "Engine error: {err}")
            }
            ProjectionError::Score(err) => {
                write!(f, "Score error: {err}")
            }
            ProjectionError::Persist(err) => {
                write!(f, "Persistence error: {err}")
            }
        }
    }
}

/// Convert a [`ProjectionError`] into a Python `ValueError` with the error
/// message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ProjectionError> for PyErr {
    fn from(err: ProjectionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<EngineError> for ProjectionError {
    fn from(err: EngineError) -> ProjectionError {
        ProjectionError::Engine(err)
    }
}

impl From<ScoreError> for ProjectionError {
    fn from(err: ScoreError) -> ProjectionError {
        ProjectionError::Score(err)
    }
}

impl From<PersistError> for ProjectionError {
    fn from(err: PersistError) -> ProjectionError {
        ProjectionError::Persist(err)
    }
}

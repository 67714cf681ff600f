//! force_scheme — force-directed multidimensional projection with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the force-directed projection pipeline to Python via the
//! `_force_scheme` extension module. When the `python-bindings` feature is
//! enabled, this module defines the Python-facing estimator class used by
//! the `force_scheme` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`projection`, `engine`, `scoring`,
//!   `persistence`, `diagnostics`) as the public crate surface.
//! - Define the `#[pyclass]` wrapper and the `#[pymodule]` initializer for
//!   the `_force_scheme` Python extension.
//! - Convert numpy arrays, pandas frames, and plain sequences into the
//!   `ndarray` inputs of the Rust estimator.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible class mirrors
//!   the invariants and state machine of the Rust estimator.
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - The Python-exposed class lives under `_force_scheme` and is typically
//!   wrapped by a thin pure-Python facade in the top-level `force_scheme`
//!   package.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules (usually
//!   through `projection::prelude`) and can ignore the PyO3 items guarded
//!   by the `python-bindings` feature.
//! - The Python packaging layer imports the `_force_scheme` module defined
//!   here and wraps its class in the user-facing Python API.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the end-to-end pipeline integration tests.
//! - The PyO3 surface is exercised by Python-side smoke tests that
//!   construct, fit, transform, and score the estimator.

pub mod diagnostics;
pub mod engine;
pub mod persistence;
pub mod projection;
pub mod scoring;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::path::Path;

#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    engine::monitor::TerminationStatus,
    projection::{errors::ProjectionError, models::scheme::ForceScheme},
    utils::{build_scheme, build_transform_options, extract_f64_matrix},
};

/// ForceScheme — Python-facing wrapper for the projection estimator.
///
/// Purpose
/// -------
/// Expose the fit/transform API of the Rust [`ForceScheme`] to Python
/// callers while preserving the core invariants and error handling.
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs (numpy arrays, pandas frames, or
///   nested sequences) into contiguous `f64` matrices.
/// - Provide `fit`, `transform`, `fit_transform`, `score`, and the
///   persistence methods by delegating to the core implementation.
/// - Cache the last run summary for inspection from Python via property
///   getters.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `ForceScheme(metric='euclidean', max_it=100, learning_rate=0.5,
/// decay=0.95, tolerance=1e-5, n_jobs=None, verbose=False)`:
/// - `metric`: `Option<&str>`
///   Distance metric name, or `'precomputed'` to fit a ready-made square
///   distance matrix.
/// - `max_it`, `learning_rate`, `decay`, `tolerance`
///   Convergence options, matching [`SchemeOptions`] semantics.
/// - `n_jobs`: `Option<i64>`
///   `None`/`1` sequential, `-1` every core, `k > 1` that many workers.
/// - `verbose`: `bool`
///   When set, diagnostics are printed to stderr.
///
/// Fields
/// ------
/// - `inner`: [`ForceScheme`]
///   Fully configured estimator owning the fitted distance matrix and the
///   cached run summary.
///
/// Invariants
/// ----------
/// - `inner` is always a well-formed estimator created through
///   [`build_scheme`]; the Python surface cannot bypass option validation.
///
/// Performance
/// -----------
/// - All heavy numerical work occurs inside `inner`; this wrapper performs
///   only input conversion, dispatch, and error mapping.
///
/// Notes
/// -----
/// - Native Rust callers should use [`ForceScheme`] directly; this type
///   exists solely for the PyO3 binding surface.
///
/// [`SchemeOptions`]: crate::projection::core::options::SchemeOptions
#[cfg(feature = "python-bindings")]
#[pyclass(module = "force_scheme", name = "ForceScheme")]
pub struct PyForceScheme {
    /// Underlying Rust estimator.
    pub inner: ForceScheme,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyForceScheme {
    #[new]
    #[pyo3(
        signature = (
            metric = None,
            max_it = None,
            learning_rate = None,
            decay = None,
            tolerance = None,
            n_jobs = None,
            verbose = false,
        ),
        text_signature = "(metric='euclidean', max_it=100, learning_rate=0.5, decay=0.95, \
                          tolerance=1e-5, n_jobs=None, verbose=False)"
    )]
    pub fn new(
        metric: Option<&str>, max_it: Option<usize>, learning_rate: Option<f64>,
        decay: Option<f64>, tolerance: Option<f64>, n_jobs: Option<i64>, verbose: bool,
    ) -> PyResult<PyForceScheme> {
        let inner =
            build_scheme(metric, max_it, learning_rate, decay, tolerance, n_jobs, verbose)?;
        Ok(PyForceScheme { inner })
    }

    /// Compute and store the pairwise distance matrix.
    #[pyo3(text_signature = "(self, data, /)")]
    pub fn fit<'py>(&mut self, py: Python<'py>, data: &Bound<'py, PyAny>) -> PyResult<()> {
        let arr = extract_f64_matrix(py, data)?;
        self.inner.fit(arr.as_array())?;
        Ok(())
    }

    /// Run the force-directed iteration; returns `(projection, error)`.
    #[pyo3(
        signature = (initial = None, dimension = None, init = None, seed = None, fixed_axis = None),
        text_signature = "(self, initial=None, /, dimension=2, init='random', seed=None, \
                          fixed_axis=None)"
    )]
    pub fn transform<'py>(
        &mut self, py: Python<'py>, initial: Option<&Bound<'py, PyAny>>,
        dimension: Option<usize>, init: Option<&str>, seed: Option<u64>,
        fixed_axis: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<(Vec<Vec<f64>>, f64)> {
        let opts = build_transform_options(py, dimension, init, seed, fixed_axis)?;
        let initial_arr = match initial {
            Some(raw) => Some(extract_f64_matrix(py, raw)?),
            None => None,
        };
        let view = initial_arr.as_ref().map(|arr| arr.as_array());
        let (projection, error) = self.inner.transform(view, &opts)?;
        Ok((matrix_rows(&projection), error))
    }

    /// Fit on `data`, then transform in one call.
    #[pyo3(
        signature = (data, dimension = None, init = None, seed = None, fixed_axis = None),
        text_signature = "(self, data, /, dimension=2, init='random', seed=None, \
                          fixed_axis=None)"
    )]
    pub fn fit_transform<'py>(
        &mut self, py: Python<'py>, data: &Bound<'py, PyAny>, dimension: Option<usize>,
        init: Option<&str>, seed: Option<u64>, fixed_axis: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<(Vec<Vec<f64>>, f64)> {
        let opts = build_transform_options(py, dimension, init, seed, fixed_axis)?;
        let arr = extract_f64_matrix(py, data)?;
        let (projection, error) = self.inner.fit_transform(arr.as_array(), &opts)?;
        Ok((matrix_rows(&projection), error))
    }

    /// Kruskal stress-1 of a layout against the fitted distances.
    #[pyo3(text_signature = "(self, projection, /)")]
    pub fn score<'py>(&self, py: Python<'py>, projection: &Bound<'py, PyAny>) -> PyResult<f64> {
        let arr = extract_f64_matrix(py, projection)?;
        Ok(self.inner.score(arr.as_array(), None)?)
    }

    /// Save the fitted distance matrix to the binary store.
    #[pyo3(text_signature = "(self, path, /)")]
    pub fn save(&self, path: &str) -> PyResult<()> {
        Ok(self.inner.save(Path::new(path))?)
    }

    /// Load a binary distance matrix, replacing any fitted one.
    #[pyo3(text_signature = "(self, path, /)")]
    pub fn load(&mut self, path: &str) -> PyResult<()> {
        Ok(self.inner.load(Path::new(path))?)
    }

    /// Load an upper-triangular distance text file.
    #[pyo3(text_signature = "(self, path, /)")]
    pub fn load_text(&mut self, path: &str) -> PyResult<()> {
        Ok(self.inner.load_text(Path::new(path))?)
    }

    #[getter]
    pub fn error(&self) -> PyResult<f64> {
        match &self.inner.outcome {
            Some(outcome) => Ok(outcome.error),
            None => Err(ProjectionError::NotFitted.into()),
        }
    }

    #[getter]
    pub fn sweeps(&self) -> PyResult<usize> {
        match &self.inner.outcome {
            Some(outcome) => Ok(outcome.sweeps),
            None => Err(ProjectionError::NotFitted.into()),
        }
    }

    #[getter]
    pub fn converged(&self) -> PyResult<bool> {
        match &self.inner.outcome {
            Some(outcome) => Ok(matches!(outcome.status, TerminationStatus::Converged { .. })),
            None => Err(ProjectionError::NotFitted.into()),
        }
    }

    #[getter]
    pub fn sample_count(&self) -> Option<usize> {
        self.inner.distances.as_ref().map(|distances| distances.n())
    }
}

// Convert Array2<f64> → Vec<Vec<f64>> (row-major) for Python consumption.
#[cfg(feature = "python-bindings")]
fn matrix_rows(projection: &Array2<f64>) -> Vec<Vec<f64>> {
    let (nrows, _ncols) = projection.dim();
    let mut out = Vec::with_capacity(nrows);
    for i in 0..nrows {
        out.push(projection.row(i).to_vec());
    }
    out
}

/// _force_scheme — PyO3 module initializer for the Python extension.
///
/// Registers the estimator class on the `_force_scheme` module. Invoked
/// automatically by Python when importing the compiled extension; not
/// called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _force_scheme<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyForceScheme>()?;
    Ok(())
}

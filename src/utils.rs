#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    diagnostics::StderrSink,
    projection::{
        core::{
            metric::Metric,
            options::{EngineChoice, InitMode, SchemeOptions, TransformOptions},
        },
        models::scheme::ForceScheme,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec/Array → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_matrix<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro);
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(PyValueError::new_err("all rows must have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let matrix = Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(matrix.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn build_scheme(
    metric: Option<&str>, max_it: Option<usize>, learning_rate: Option<f64>, decay: Option<f64>,
    tolerance: Option<f64>, n_jobs: Option<i64>, verbose: bool,
) -> PyResult<ForceScheme> {
    // Metric::from_name -> ProjectionResult<Metric> -> PyErr
    let metric = Metric::from_name(metric.unwrap_or("euclidean"))?;

    let defaults = SchemeOptions::default();
    let options = SchemeOptions::new(
        max_it.unwrap_or(defaults.max_it),
        learning_rate.unwrap_or(defaults.learning_rate0),
        decay.unwrap_or(defaults.decay),
        tolerance.unwrap_or(defaults.tolerance),
    )?;

    // n_jobs follows the usual estimator convention: None or 1 stays
    // sequential, -1 means every core, k > 1 means k workers.
    let engine = match n_jobs {
        None | Some(1) => EngineChoice::Sequential,
        Some(-1) => EngineChoice::Parallel { threads: None },
        Some(workers) if workers > 1 => {
            EngineChoice::Parallel { threads: Some(workers as usize) }
        }
        Some(other) => {
            return Err(PyValueError::new_err(format!(
                "invalid n_jobs {other} (expected -1, or a positive worker count)"
            )));
        }
    };

    let mut scheme = ForceScheme::new(metric, options, engine);
    if verbose {
        scheme.set_sink(Box::new(StderrSink));
    }
    Ok(scheme)
}

#[cfg(feature = "python-bindings")]
pub fn build_transform_options<'py>(
    py: Python<'py>, dimension: Option<usize>, init: Option<&str>, seed: Option<u64>,
    fixed_axis: Option<&Bound<'py, PyAny>>,
) -> PyResult<TransformOptions> {
    let init_str = init.unwrap_or("random");
    let init_mode = match init_str {
        "random" => InitMode::Random,
        "supplied" => InitMode::Supplied,
        "pca" => InitMode::Pca,
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid init {:?} (expected 'random', 'supplied', or 'pca')",
                other
            )));
        }
    };

    let axis = match fixed_axis {
        Some(raw) => {
            let arr = extract_f64_array(py, raw)?;
            let slice = arr.as_slice().map_err(|_| {
                PyValueError::new_err(
                    "fixed_axis must be a 1-D contiguous float64 array or sequence",
                )
            })?;
            Some(Array1::from(slice.to_vec()))
        }
        None => None,
    };

    // TransformOptions::new -> ProjectionResult<TransformOptions> -> PyErr
    Ok(TransformOptions::new(dimension.unwrap_or(2), init_mode, seed, axis)?)
}

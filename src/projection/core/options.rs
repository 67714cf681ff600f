//! Configuration bundles for Force Scheme runs.
//!
//! Purpose
//! -------
//! Collect the validated knobs of the optimization loop ([`SchemeOptions`]),
//! the per-transform choices ([`TransformOptions`] with [`TargetDimension`],
//! [`InitMode`], seed, and fixed-axis override), and the engine selection
//! ([`EngineChoice`]). Validation happens at construction so the hot loop
//! never re-checks.
//!
//! Conventions
//! -----------
//! - Defaults match the original technique: `max_it = 100`,
//!   `learning_rate0 = 0.5`, `decay = 0.95`, `tolerance = 1e-5`, 2D output,
//!   random initialization, sequential engine.
//! - Only dimensionalities 2 and 3 are supported; anything else is rejected
//!   at [`TargetDimension::new`], before any run state exists.
use ndarray::Array1;

use crate::projection::errors::{ProjectionError, ProjectionResult};

/// Sweep-loop configuration: iteration cap, learning-rate schedule
/// parameters, and the convergence tolerance.
///
/// Fields
/// ------
/// - `max_it`: hard cap on sweeps; the loop never exceeds it.
/// - `learning_rate0`: initial learning rate, finite and `> 0`.
/// - `decay`: schedule exponent, finite and `>= 0`; the per-sweep rate is
///   `learning_rate0 * (1 - k / max_it)^decay`.
/// - `tolerance`: early-stop threshold on `|error_k - error_{k-1}|`, finite
///   and `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeOptions {
    /// Maximum number of sweeps per transform.
    pub max_it: usize,
    /// Initial learning rate.
    pub learning_rate0: f64,
    /// Decay exponent of the learning-rate schedule.
    pub decay: f64,
    /// Convergence tolerance on the sweep-error delta.
    pub tolerance: f64,
}

impl SchemeOptions {
    /// Construct validated sweep-loop options.
    ///
    /// # Rules
    /// - `max_it >= 1`.
    /// - `learning_rate0` finite and strictly positive.
    /// - `decay` finite and non-negative.
    /// - `tolerance` finite and non-negative.
    ///
    /// # Errors
    /// - [`ProjectionError::InvalidOption`] naming the offending option.
    pub fn new(
        max_it: usize, learning_rate0: f64, decay: f64, tolerance: f64,
    ) -> ProjectionResult<Self> {
        if max_it == 0 {
            return Err(ProjectionError::InvalidOption {
                name: "max_it",
                value: 0.0,
                reason: "greater than zero",
            });
        }
        if !learning_rate0.is_finite() || learning_rate0 <= 0.0 {
            return Err(ProjectionError::InvalidOption {
                name: "learning_rate0",
                value: learning_rate0,
                reason: "finite and strictly positive",
            });
        }
        if !decay.is_finite() || decay < 0.0 {
            return Err(ProjectionError::InvalidOption {
                name: "decay",
                value: decay,
                reason: "finite and non-negative",
            });
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ProjectionError::InvalidOption {
                name: "tolerance",
                value: tolerance,
                reason: "finite and non-negative",
            });
        }
        Ok(SchemeOptions { max_it, learning_rate0, decay, tolerance })
    }
}

impl Default for SchemeOptions {
    /// The original technique's defaults.
    fn default() -> Self {
        SchemeOptions { max_it: 100, learning_rate0: 0.5, decay: 0.95, tolerance: 1e-5 }
    }
}

/// Supported output dimensionalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetDimension {
    #[default]
    Two,
    Three,
}

impl TargetDimension {
    /// Validate a requested dimensionality.
    ///
    /// # Errors
    /// - [`ProjectionError::UnsupportedDimensionality`] for anything other
    ///   than 2 or 3. Rejection happens here, before any projection state
    ///   is created or mutated.
    pub fn new(requested: usize) -> ProjectionResult<Self> {
        match requested {
            2 => Ok(TargetDimension::Two),
            3 => Ok(TargetDimension::Three),
            _ => Err(ProjectionError::UnsupportedDimensionality { requested }),
        }
    }

    /// The dimensionality as a column count.
    pub fn as_usize(&self) -> usize {
        match self {
            TargetDimension::Two => 2,
            TargetDimension::Three => 3,
        }
    }
}

/// How the starting projection is obtained.
///
/// - `Random`: uniform `[0, 1)` coordinates from the run's seeded generator.
/// - `Supplied`: the caller passes an `n x d` starting projection to
///   `transform`.
/// - `Pca`: the caller passes the `n x features` sample matrix to
///   `transform`; the start is its projection onto the top `d` principal
///   components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitMode {
    #[default]
    Random,
    Supplied,
    Pca,
}

impl InitMode {
    /// Name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMode::Random => "random",
            InitMode::Supplied => "supplied",
            InitMode::Pca => "pca",
        }
    }
}

/// Per-transform choices: dimensionality, initialization, seed, and the
/// optional fixed-axis override pinning the last output column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformOptions {
    /// Output dimensionality (2 or 3).
    pub dimension: TargetDimension,
    /// Starting-projection strategy.
    pub init: InitMode,
    /// Seed for the run's generator; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Per-sample values pinned to the last output column, excluded from
    /// force updates and from the post-run min-shift.
    pub fixed_axis: Option<Array1<f64>>,
}

impl TransformOptions {
    /// Construct validated per-transform options.
    ///
    /// # Rules
    /// - `dimension` must be 2 or 3.
    /// - Fixed-axis values, when given, must all be finite; their length is
    ///   checked against the fitted sample count at transform time.
    ///
    /// # Errors
    /// - [`ProjectionError::UnsupportedDimensionality`] for a bad dimension.
    /// - [`ProjectionError::InvalidOption`] for a non-finite fixed-axis
    ///   value.
    pub fn new(
        dimension: usize, init: InitMode, seed: Option<u64>, fixed_axis: Option<Array1<f64>>,
    ) -> ProjectionResult<Self> {
        let dimension = TargetDimension::new(dimension)?;
        if let Some(axis) = &fixed_axis {
            for &value in axis.iter() {
                if !value.is_finite() {
                    return Err(ProjectionError::InvalidOption {
                        name: "fixed_axis",
                        value,
                        reason: "finite",
                    });
                }
            }
        }
        Ok(TransformOptions { dimension, init, seed, fixed_axis })
    }
}

/// Which iteration engine a model uses.
///
/// `Parallel` is the accelerated backend; when its thread pool cannot be
/// built the model falls back to `Sequential` for the same run and reports
/// the event through its diagnostics sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineChoice {
    #[default]
    Sequential,
    /// Batched engine on a dedicated thread pool; `threads: None` lets the
    /// pool size itself from the available parallelism.
    Parallel { threads: Option<usize> },
}

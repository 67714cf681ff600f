//! Convergence loop shared by all iteration engines.
//!
//! The monitor owns everything around the sweeps: scheduling the learning
//! rate, watching the error trajectory, stopping on convergence or budget
//! exhaustion, reporting those events to the diagnostics sink, and
//! normalizing the finished layout so every free axis starts at zero.
use ndarray::Array2;

use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink};
use crate::engine::errors::{EngineError, EngineResult};
use crate::engine::schedule::LearningSchedule;
use crate::engine::traits::{SweepContext, SweepEngine};
use crate::projection::core::condensed::CondensedDistances;

/// How a sweep run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminationStatus {
    /// The error change between consecutive sweeps fell below the
    /// tolerance at the given zero-based sweep.
    Converged { sweep: usize, delta: f64 },

    /// The sweep budget ran out before the error settled.
    Exhausted,
}

/// Summary of a finished sweep run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    /// Mean absolute pairwise discrepancy after the final sweep.
    pub error: f64,

    /// Number of sweeps actually executed.
    pub sweeps: usize,

    /// Why the run stopped.
    pub status: TerminationStatus,
}

/// Immutable inputs of a sweep run.
#[derive(Debug, Clone, Copy)]
pub struct RunSpec<'a> {
    /// Pairwise target distances.
    pub distances: &'a CondensedDistances,

    /// Visit order for every sweep; must be a permutation of `0..n`.
    pub order: &'a [usize],

    /// Per-sweep learning-rate schedule; also carries the sweep budget.
    pub schedule: LearningSchedule,

    /// Convergence threshold on `|error - previous error|`.
    pub tolerance: f64,

    /// Freeze the last projection column across sweeps and the final shift.
    pub pin_last_axis: bool,
}

/// Runs sweeps until convergence or exhaustion and normalizes the result.
///
/// # Arguments
/// - `engine`: the sweep implementation to drive.
/// - `spec`: distances, visit order, schedule, tolerance and pinning.
/// - `projection`: initial layout, updated in place.
/// - `sink`: receives the convergence or exhaustion event.
///
/// # Returns
/// - `Ok(RunOutcome)`: final error, executed sweep count and stop reason.
///
/// # Errors
/// - [`EngineError::StateMismatch`]: `projection` row count differs from
///   the distance matrix sample count.
/// - [`EngineError::BadWidth`]: `projection` is not 2 or 3 columns wide.
///
/// # Notes
/// - The previous-error seed is `+inf`, so the first sweep can never
///   satisfy the tolerance and every run executes at least one sweep.
/// - On convergence the reported error is the converging sweep's own
///   error, not the one before it.
/// - After the loop every free column is shifted so its minimum is
///   exactly zero; a pinned column keeps its values untouched.
pub fn run_sweeps(
    engine: &dyn SweepEngine,
    spec: &RunSpec<'_>,
    projection: &mut Array2<f64>,
    sink: &dyn DiagnosticsSink,
) -> EngineResult<RunOutcome> {
    let n = spec.distances.n();
    if projection.nrows() != n {
        return Err(EngineError::StateMismatch { rows: projection.nrows(), expected: n });
    }
    let width = projection.ncols();
    if width != 2 && width != 3 {
        return Err(EngineError::BadWidth { cols: width });
    }
    debug_assert_eq!(spec.order.len(), n);

    let mut prev_error = f64::INFINITY;
    let mut error = f64::INFINITY;
    for sweep in 0..spec.schedule.max_it() {
        let ctx = SweepContext {
            distances: spec.distances,
            order: spec.order,
            learning_rate: spec.schedule.rate(sweep),
            pin_last_axis: spec.pin_last_axis,
        };
        error = engine.sweep(&ctx, projection);

        let delta = (error - prev_error).abs();
        if delta < spec.tolerance {
            sink.report(&DiagnosticEvent::SweepConverged { sweep, delta });
            shift_to_origin(projection, spec.pin_last_axis);
            return Ok(RunOutcome {
                error,
                sweeps: sweep + 1,
                status: TerminationStatus::Converged { sweep, delta },
            });
        }
        prev_error = error;
    }

    let sweeps = spec.schedule.max_it();
    sink.report(&DiagnosticEvent::SweepsExhausted { sweeps });
    shift_to_origin(projection, spec.pin_last_axis);
    Ok(RunOutcome { error, sweeps, status: TerminationStatus::Exhausted })
}

/// Translates each free column so its smallest entry sits at zero.
fn shift_to_origin(projection: &mut Array2<f64>, pin_last_axis: bool) {
    let free_cols = projection.ncols() - usize::from(pin_last_axis);
    for k in 0..free_cols {
        let mut column = projection.column_mut(k);
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        if min.is_finite() {
            column.mapv_inplace(|v| v - min);
        }
    }
}

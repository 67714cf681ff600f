//! Per-sweep contract shared by every iteration engine.
//!
//! - [`SweepEngine`]: trait engines implement; one call performs one full
//!   sweep over every point and returns the sweep's aggregate error.
//! - [`SweepContext`]: the read-only inputs of a sweep (distances, visit
//!   order, learning rate, fixed-axis flag).
//! - [`force_step`]: the pair force arithmetic both built-in engines share,
//!   so sequential and batched execution differ only in scheduling.
//!
//! Convention: the visited point `i` moves; every other point `j` is a
//! reference. The displacement reduces the discrepancy between the stored
//! high-dimensional distance `d_ij` and the current low-dimensional
//! distance `D_ij`.
use ndarray::Array2;

use crate::projection::core::condensed::CondensedDistances;

/// Projection distances below this are treated as coincident; the direction
/// of the pair force is then undefined and a deterministic fallback is used.
pub const MIN_DISTANCE: f64 = 1e-4;

/// Read-only inputs of a single sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepContext<'a> {
    /// The fitted condensed distances.
    pub distances: &'a CondensedDistances,
    /// Visit order for this run; a permutation of `0..n`.
    pub order: &'a [usize],
    /// Learning rate for this sweep, from the decay schedule.
    pub learning_rate: f64,
    /// Whether the last projection column is pinned and excluded from
    /// updates.
    pub pin_last_axis: bool,
}

/// One full pass updating every point once.
///
/// Implementations must honor the identical per-sweep contract so the
/// convergence monitor and the stress scorer never distinguish engines:
/// - visit every point exactly once in `ctx.order` sequence;
/// - move each visited point against every other point by [`force_step`];
/// - leave the pinned column untouched when `ctx.pin_last_axis` is set;
/// - return the mean absolute discrepancy `|d_ij - D_ij|` over all
///   `n(n-1)` ordered pairs visited.
///
/// The trait is deliberately silent on read/write scheduling: the
/// sequential engine lets updates from earlier points be visible to later
/// points within the sweep, while the batched engine reads a pre-sweep
/// snapshot. The two trajectories differ numerically; each engine documents
/// its choice.
pub trait SweepEngine {
    /// Engine name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Perform one sweep, mutating `projection` in place, and return the
    /// sweep error.
    fn sweep(&self, ctx: &SweepContext<'_>, projection: &mut Array2<f64>) -> f64;
}

/// Force contribution of reference point `j` on visited point `i`.
///
/// Returns the per-column displacement of `p_i` (only the first
/// `update_cols` entries are meaningful) and `|d_ij - D_ij|` for the error
/// aggregate. The displacement is
/// `learning_rate * (d_ij - D_ij) * (p_i - p_j) / max(D_ij, MIN_DISTANCE)`;
/// its magnitude is bounded by `learning_rate * |d_ij - D_ij|`. The full
/// width participates in `D_ij` (a pinned column still shapes the
/// distance), while `update_cols` restricts which columns move.
///
/// For near-coincident points (`D_ij < MIN_DISTANCE`) the direction
/// degenerates, so a deterministic unit fallback along the first axis is
/// used, signed by index order so the pair separates instead of traveling
/// together.
#[inline]
pub fn force_step(
    projection: &Array2<f64>, i: usize, j: usize, dij: f64, learning_rate: f64, width: usize,
    update_cols: usize,
) -> ([f64; 3], f64) {
    let mut v = [0.0_f64; 3];
    let mut sq = 0.0;
    for (k, slot) in v.iter_mut().enumerate().take(width) {
        let diff = projection[(i, k)] - projection[(j, k)];
        *slot = diff;
        sq += diff * diff;
    }
    let dist = sq.sqrt();
    let delta = dij - dist;

    let denom;
    if dist < MIN_DISTANCE {
        v = [if i > j { 1.0 } else { -1.0 }, 0.0, 0.0];
        denom = 1.0;
    } else {
        denom = dist;
    }

    let factor = learning_rate * delta / denom;
    let mut disp = [0.0_f64; 3];
    for k in 0..update_cols {
        disp[k] = factor * v[k];
    }
    (disp, delta.abs())
}

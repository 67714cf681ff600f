//! Baseline sequential (Gauss-Seidel) iteration engine.
use ndarray::Array2;

use crate::engine::traits::{SweepContext, SweepEngine, force_step};

/// The baseline engine: one logical thread, sequential in-sweep mutation.
///
/// Updates are applied as soon as they are computed, so every visited point
/// reads the already-updated positions of the points visited before it in
/// the same sweep. This read-your-own-writes trajectory is the technique's
/// reference semantics, not an artifact of single-threading.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialEngine;

impl SweepEngine for SequentialEngine {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn sweep(&self, ctx: &SweepContext<'_>, projection: &mut Array2<f64>) -> f64 {
        let n = ctx.distances.n();
        let width = projection.ncols();
        let update_cols = width - usize::from(ctx.pin_last_axis);

        let mut error_acc = 0.0;
        for &i in ctx.order {
            for j in 0..n {
                if j == i {
                    continue;
                }
                let dij = ctx.distances.get(i, j);
                let (disp, abs_delta) =
                    force_step(projection, i, j, dij, ctx.learning_rate, width, update_cols);
                for (k, &d) in disp.iter().enumerate().take(update_cols) {
                    projection[(i, k)] += d;
                }
                error_acc += abs_delta;
            }
        }
        error_acc / (n * (n - 1)) as f64
    }
}

//! Snapshot-batched parallel iteration engine backed by a rayon pool.
use ndarray::Array2;
use rayon::prelude::*;

use crate::engine::errors::{EngineError, EngineResult};
use crate::engine::traits::{SweepContext, SweepEngine, force_step};

/// Data-parallel engine running each sweep against a frozen snapshot.
///
/// # Purpose
/// Distributes the per-point force accumulation of a sweep across a
/// dedicated rayon thread pool. Every visited point computes its total
/// displacement from the positions as they stood when the sweep began;
/// all displacements are applied together once the batch completes.
///
/// # Key behaviors
/// - Jacobi-style batching: no point observes another point's same-sweep
///   update, unlike [`SequentialEngine`](crate::engine::sequential::SequentialEngine)
///   where later points read earlier in-sweep writes.
/// - Deterministic for a fixed visit order: per-point accumulation is
///   sequential and application order follows the visit order, so the
///   result does not depend on the number of worker threads.
/// - The pool is private to the engine; no interaction with rayon's
///   global pool.
///
/// # Errors
/// [`ParallelEngine::new`] fails with [`EngineError::ThreadPool`] when the
/// pool cannot be built, letting callers fall back to the sequential
/// engine.
#[derive(Debug)]
pub struct ParallelEngine {
    pool: rayon::ThreadPool,
}

impl ParallelEngine {
    /// Builds the engine with its own thread pool.
    ///
    /// # Arguments
    /// - `threads`: worker count, or `None` to accept rayon's default
    ///   (one per available core).
    ///
    /// # Errors
    /// - [`EngineError::ThreadPool`]: the underlying pool could not be
    ///   spawned.
    pub fn new(threads: Option<usize>) -> EngineResult<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(workers) = threads {
            builder = builder.num_threads(workers);
        }
        let pool = builder.build().map_err(EngineError::from)?;
        Ok(Self { pool })
    }
}

impl SweepEngine for ParallelEngine {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn sweep(&self, ctx: &SweepContext<'_>, projection: &mut Array2<f64>) -> f64 {
        let n = ctx.distances.n();
        let width = projection.ncols();
        let update_cols = width - usize::from(ctx.pin_last_axis);

        let snapshot = projection.clone();
        let batch: Vec<(usize, [f64; 3], f64)> = self.pool.install(|| {
            ctx.order
                .par_iter()
                .map(|&i| {
                    let mut disp_acc = [0.0f64; 3];
                    let mut error_acc = 0.0;
                    for j in 0..n {
                        if j == i {
                            continue;
                        }
                        let dij = ctx.distances.get(i, j);
                        let (disp, abs_delta) = force_step(
                            &snapshot,
                            i,
                            j,
                            dij,
                            ctx.learning_rate,
                            width,
                            update_cols,
                        );
                        for (k, &d) in disp.iter().enumerate().take(update_cols) {
                            disp_acc[k] += d;
                        }
                        error_acc += abs_delta;
                    }
                    (i, disp_acc, error_acc)
                })
                .collect()
        });

        let mut error_acc = 0.0;
        for (i, disp, point_error) in batch {
            for (k, &d) in disp.iter().enumerate().take(update_cols) {
                projection[(i, k)] += d;
            }
            error_acc += point_error;
        }
        error_acc / (n * (n - 1)) as f64
    }
}

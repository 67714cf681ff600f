//! Force-directed projection estimator.
//!
//! This module wires the whole pipeline together: a distance [`Metric`] (or a
//! precomputed matrix) feeding a [`CondensedDistances`] store, a starting
//! layout from the initialization strategies, and sweep engines driven to
//! convergence by the monitor.
//!
//! Key ideas:
//! - `fit` is the expensive half (the `O(n^2)` distance matrix); `transform`
//!   is the iterative half and can be repeated with different dimensions,
//!   seeds, or initializations without re-paying `fit`.
//! - All randomness of a run flows from one seedable generator, so a fixed
//!   seed makes `transform` fully reproducible, engine choice included.
//! - The accelerated backend is an optimization, never a requirement: if its
//!   thread pool cannot be built the run falls back to the sequential engine
//!   and the event is reported through the diagnostics sink.
use std::path::Path;

use crate::{
    diagnostics::{DiagnosticEvent, DiagnosticsSink, NoopSink},
    engine::{
        monitor::{RunOutcome, RunSpec, run_sweeps},
        parallel::ParallelEngine,
        schedule::LearningSchedule,
        sequential::SequentialEngine,
    },
    persistence::{
        binary::{load_condensed, save_condensed},
        text::read_distance_text,
    },
    projection::{
        core::{
            condensed::CondensedDistances,
            init::{initial_projection, make_rng, pin_fixed_axis, visit_order},
            metric::Metric,
            options::{EngineChoice, SchemeOptions, TransformOptions},
        },
        errors::{ProjectionError, ProjectionResult},
    },
    scoring::stress::kruskal_stress,
};
use ndarray::{Array2, ArrayView2};

/// Force-directed multidimensional projection estimator.
///
/// Encapsulates the distance metric (`metric`), convergence options
/// (`options`), and iteration backend choice (`engine`). After fitting,
/// [`distances`] holds the condensed pairwise matrix; after a transform,
/// [`outcome`] stores the last run's convergence summary.
///
/// # Notes
/// - The distance matrix is computed once per `fit` and shared by every
///   subsequent `transform`, `score`, and `save`.
/// - Diagnostics are off by default; install a sink with [`set_sink`] to
///   observe footprint, convergence, and backend-fallback events.
///
/// [`distances`]: ForceScheme::distances
/// [`outcome`]: ForceScheme::outcome
/// [`set_sink`]: ForceScheme::set_sink
#[derive(Debug)]
pub struct ForceScheme {
    /// Pairwise distance metric used by `fit`.
    pub metric: Metric,
    /// Convergence options shared by every transform.
    pub options: SchemeOptions,
    /// Iteration backend used by `transform`.
    pub engine: EngineChoice,
    /// Condensed distance matrix (populated after `fit` or a load).
    pub distances: Option<CondensedDistances>,
    /// Last run summary (populated after `transform`).
    pub outcome: Option<RunOutcome>,
    sink: Box<dyn DiagnosticsSink>,
}

impl ForceScheme {
    /// Construct an estimator from validated parts.
    ///
    /// # Arguments
    /// - `metric`: distance routine applied by `fit`, or the precomputed
    ///   marker to accept a ready-made square matrix.
    /// - `options`: learning-rate schedule, sweep budget, and tolerance.
    /// - `engine`: sequential baseline or the batched parallel backend.
    pub fn new(metric: Metric, options: SchemeOptions, engine: EngineChoice) -> ForceScheme {
        ForceScheme {
            metric,
            options,
            engine,
            distances: None,
            outcome: None,
            sink: Box::new(NoopSink),
        }
    }

    /// Euclidean metric, default options, sequential engine.
    pub fn with_defaults() -> ForceScheme {
        ForceScheme::new(Metric::default(), SchemeOptions::default(), EngineChoice::default())
    }

    /// Install a diagnostics sink, replacing the current one.
    pub fn set_sink(&mut self, sink: Box<dyn DiagnosticsSink>) {
        self.sink = sink;
    }

    /// Compute and store the condensed pairwise distance matrix.
    ///
    /// ## Steps
    /// 1. Apply the configured metric to every unordered sample pair (or,
    ///    for the precomputed metric, validate `samples` as a square
    ///    distance matrix and condense it).
    /// 2. Store the matrix on the estimator and report its memory
    ///    footprint through the diagnostics sink.
    ///
    /// ## Arguments
    /// - `samples`: `n x features` data, or an `n x n` distance matrix for
    ///   the precomputed metric.
    ///
    /// ## Side effects
    /// - Replaces any previously fitted matrix and clears `outcome`.
    ///
    /// ## Errors
    /// - [`ProjectionError::TooFewSamples`]: fewer than two rows.
    /// - [`ProjectionError::NotSquare`]: precomputed input is not square.
    /// - [`ProjectionError::InvalidDistance`]: a computed or supplied
    ///   distance is negative or non-finite.
    pub fn fit(&mut self, samples: ArrayView2<'_, f64>) -> ProjectionResult<()> {
        let distances = CondensedDistances::from_samples(samples, &self.metric)?;
        self.sink
            .report(&DiagnosticEvent::MatrixFootprint { bytes: distances.footprint_bytes() });
        self.distances = Some(distances);
        self.outcome = None;
        Ok(())
    }

    /// Run the force-directed iteration and return the layout.
    ///
    /// ## Steps
    /// 1. Build the starting layout: random from the run's generator, the
    ///    caller's matrix as-is, or a PCA of the caller's samples,
    ///    according to `opts.init`.
    /// 2. Pin the fixed axis onto the last column when configured.
    /// 3. Shuffle the per-sweep visit order from the same generator.
    /// 4. Drive the chosen engine to convergence or exhaustion; a parallel
    ///    backend that cannot start falls back to sequential with a
    ///    diagnostics event.
    /// 5. Cache the run summary in `outcome`.
    ///
    /// ## Arguments
    /// - `initial`: the starting `n x dimension` layout for
    ///   [`InitMode::Supplied`], the `n x features` samples for
    ///   [`InitMode::Pca`], ignored (and normally `None`) for
    ///   [`InitMode::Random`].
    /// - `opts`: dimensionality, initialization, seed, and fixed axis.
    ///
    /// ## Returns
    /// - `Ok((projection, error))`: the `n x dimension` layout, every free
    ///   column shifted to a zero minimum, and the final sweep's mean
    ///   absolute pairwise discrepancy.
    ///
    /// ## Errors
    /// - [`ProjectionError::NotFitted`]: no distance matrix present.
    /// - [`ProjectionError::MissingInitial`] and the shape/finiteness
    ///   errors of the initialization strategies.
    /// - [`ProjectionError::FixedAxisLength`]: fixed-axis length differs
    ///   from the fitted sample count.
    /// - [`ProjectionError::Engine`]: run-state validation failed.
    ///
    /// [`InitMode::Supplied`]: crate::projection::core::options::InitMode::Supplied
    /// [`InitMode::Pca`]: crate::projection::core::options::InitMode::Pca
    /// [`InitMode::Random`]: crate::projection::core::options::InitMode::Random
    pub fn transform(
        &mut self, initial: Option<ArrayView2<'_, f64>>, opts: &TransformOptions,
    ) -> ProjectionResult<(Array2<f64>, f64)> {
        let distances = self.distances.as_ref().ok_or(ProjectionError::NotFitted)?;
        let n = distances.n();

        let mut rng = make_rng(opts.seed);
        let mut projection = initial_projection(n, opts.dimension, opts.init, initial, &mut rng)?;
        if let Some(axis) = &opts.fixed_axis {
            pin_fixed_axis(&mut projection, axis)?;
        }
        let order = visit_order(n, &mut rng);

        let spec = RunSpec {
            distances,
            order: &order,
            schedule: LearningSchedule::new(&self.options),
            tolerance: self.options.tolerance,
            pin_last_axis: opts.fixed_axis.is_some(),
        };
        let outcome = match self.engine {
            EngineChoice::Sequential => {
                run_sweeps(&SequentialEngine, &spec, &mut projection, self.sink.as_ref())?
            }
            EngineChoice::Parallel { threads } => match ParallelEngine::new(threads) {
                Ok(engine) => run_sweeps(&engine, &spec, &mut projection, self.sink.as_ref())?,
                Err(err) => {
                    self.sink
                        .report(&DiagnosticEvent::BackendFallback { reason: err.to_string() });
                    run_sweeps(&SequentialEngine, &spec, &mut projection, self.sink.as_ref())?
                }
            },
        };

        self.outcome = Some(outcome);
        Ok((projection, outcome.error))
    }

    /// Fit on `samples`, then transform in one call.
    ///
    /// The samples are forwarded to `transform` as its `initial` matrix, so
    /// [`InitMode::Pca`](crate::projection::core::options::InitMode::Pca)
    /// works without passing the data twice. Not available with the
    /// precomputed metric combined with `Pca` in a useful way, since the
    /// matrix rows are distances, not features.
    ///
    /// ## Errors
    /// - Everything `fit` and `transform` can produce.
    pub fn fit_transform(
        &mut self, samples: ArrayView2<'_, f64>, opts: &TransformOptions,
    ) -> ProjectionResult<(Array2<f64>, f64)> {
        self.fit(samples)?;
        self.transform(Some(samples), opts)
    }

    /// Kruskal stress-1 of a layout against stored distances.
    ///
    /// Scores against `distances` when given, otherwise against the fitted
    /// matrix.
    ///
    /// ## Errors
    /// - [`ProjectionError::NotFitted`]: no matrix supplied and none
    ///   fitted.
    /// - [`ProjectionError::Score`]: shape or finiteness violations.
    pub fn score(
        &self, projection: ArrayView2<'_, f64>, distances: Option<&CondensedDistances>,
    ) -> ProjectionResult<f64> {
        let target = match distances {
            Some(matrix) => matrix,
            None => self.distances.as_ref().ok_or(ProjectionError::NotFitted)?,
        };
        Ok(kruskal_stress(target, projection)?)
    }

    /// Save the fitted distance matrix to the binary store.
    ///
    /// ## Errors
    /// - [`ProjectionError::NotFitted`]: nothing fitted yet.
    /// - [`ProjectionError::Persist`]: I/O or encoding failure.
    pub fn save(&self, path: &Path) -> ProjectionResult<()> {
        let distances = self.distances.as_ref().ok_or(ProjectionError::NotFitted)?;
        save_condensed(distances, path)?;
        Ok(())
    }

    /// Load a binary distance matrix, replacing any fitted one.
    ///
    /// ## Errors
    /// - [`ProjectionError::Persist`]: I/O, decoding, or validation
    ///   failure.
    pub fn load(&mut self, path: &Path) -> ProjectionResult<()> {
        let distances = load_condensed(path)?;
        self.sink
            .report(&DiagnosticEvent::MatrixFootprint { bytes: distances.footprint_bytes() });
        self.distances = Some(distances);
        self.outcome = None;
        Ok(())
    }

    /// Load an upper-triangular distance text file, replacing any fitted
    /// matrix.
    ///
    /// ## Errors
    /// - [`ProjectionError::Persist`]: I/O, format, or validation failure.
    pub fn load_text(&mut self, path: &Path) -> ProjectionResult<()> {
        let distances = read_distance_text(path)?;
        self.sink
            .report(&DiagnosticEvent::MatrixFootprint { bytes: distances.footprint_bytes() });
        self.distances = Some(distances);
        self.outcome = None;
        Ok(())
    }
}

impl Default for ForceScheme {
    fn default() -> Self {
        ForceScheme::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::core::options::InitMode;
    use ndarray::array;
    use std::sync::{Arc, Mutex};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The fit/transform state machine: gates, invalidation, and the
    //   footprint event.
    // - Seed determinism across engines and the fixed-axis path end to
    //   end.
    // - Score source selection between fitted and supplied matrices.
    //
    // These tests intentionally DO NOT cover:
    // - Convergence quality on real datasets (owned by the integration
    //   tests).
    // - Persistence round-trips (owned by the persistence tests and the
    //   integration tests).
    // -------------------------------------------------------------------------

    // Shares its event log through an Arc so a test can keep reading after
    // the sink is boxed into the estimator.
    #[derive(Debug, Clone, Default)]
    struct RecordingSink {
        events: Arc<Mutex<Vec<DiagnosticEvent>>>,
    }

    impl DiagnosticsSink for RecordingSink {
        fn report(&self, event: &DiagnosticEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn square_samples() -> Array2<f64> {
        array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
    }

    fn seeded(seed: u64) -> TransformOptions {
        TransformOptions { seed: Some(seed), ..TransformOptions::default() }
    }

    // Purpose
    // -------
    // Transform before fit must fail with the dedicated gate error and
    // leave no outcome behind.
    //
    // Given
    // -----
    // - A fresh estimator.
    //
    // Expect
    // ------
    // - NotFitted from transform, score, and save.
    #[test]
    fn unfitted_estimator_is_gated() {
        let mut model = ForceScheme::with_defaults();

        let err = model.transform(None, &seeded(7)).unwrap_err();
        assert_eq!(err, ProjectionError::NotFitted);

        let layout = array![[0.0, 0.0], [1.0, 0.0]];
        assert_eq!(model.score(layout.view(), None).unwrap_err(), ProjectionError::NotFitted);

        let dir = tempfile::tempdir().unwrap();
        let err = model.save(&dir.path().join("d.bin")).unwrap_err();
        assert_eq!(err, ProjectionError::NotFitted);
        assert!(model.outcome.is_none());
    }

    // Purpose
    // -------
    // Fitting computes the expected pairwise distances and reports the
    // matrix footprint exactly once.
    //
    // Given
    // -----
    // - The unit square under the default Euclidean metric and a
    //   recording sink.
    //
    // Expect
    // ------
    // - Side length 1, diagonal sqrt(2), one MatrixFootprint event with
    //   the stored byte count.
    #[test]
    fn fit_stores_distances_and_reports_footprint() {
        let mut model = ForceScheme::with_defaults();
        let sink = RecordingSink::default();
        let events = sink.events.clone();
        model.set_sink(Box::new(sink));
        model.fit(square_samples().view()).unwrap();

        let distances = model.distances.as_ref().unwrap();
        assert_eq!(distances.n(), 4);
        assert!((distances.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((distances.get(0, 3) - 2f64.sqrt()).abs() < 1e-12);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], DiagnosticEvent::MatrixFootprint { bytes: 48 });
    }

    // Purpose
    // -------
    // The same seed must reproduce a transform bit-for-bit; a different
    // seed must not.
    //
    // Given
    // -----
    // - One fitted estimator transformed three times.
    //
    // Expect
    // ------
    // - Runs with seed 42 identical; seed 43 different.
    #[test]
    fn seeds_make_transforms_reproducible() {
        let mut model = ForceScheme::with_defaults();
        model.fit(square_samples().view()).unwrap();

        let (first, err_first) = model.transform(None, &seeded(42)).unwrap();
        let (second, err_second) = model.transform(None, &seeded(42)).unwrap();
        let (other, _) = model.transform(None, &seeded(43)).unwrap();

        assert_eq!(first, second);
        assert_eq!(err_first.to_bits(), err_second.to_bits());
        assert_ne!(first, other);
    }

    // Purpose
    // -------
    // The parallel backend must agree with its own repetition under a
    // fixed seed and leave a cached outcome.
    //
    // Given
    // -----
    // - A fitted estimator using the parallel engine with 2 threads.
    //
    // Expect
    // ------
    // - Two identical seeded runs; outcome populated with a bounded sweep
    //   count.
    #[test]
    fn parallel_engine_is_seed_stable() {
        let mut model = ForceScheme::new(
            Metric::default(),
            SchemeOptions::default(),
            EngineChoice::Parallel { threads: Some(2) },
        );
        model.fit(square_samples().view()).unwrap();

        let (first, _) = model.transform(None, &seeded(9)).unwrap();
        let (second, _) = model.transform(None, &seeded(9)).unwrap();

        assert_eq!(first, second);
        let outcome = model.outcome.unwrap();
        assert!(outcome.sweeps <= model.options.max_it);
        assert!(outcome.error.is_finite());
    }

    // Purpose
    // -------
    // A supplied starting layout must be honored and validated.
    //
    // Given
    // -----
    // - A correct 4x2 start and a wrong 3x2 start.
    //
    // Expect
    // ------
    // - The correct start runs; the wrong one reports RowCountMismatch.
    #[test]
    fn supplied_start_is_validated() {
        let mut model = ForceScheme::with_defaults();
        model.fit(square_samples().view()).unwrap();
        let opts = TransformOptions { init: InitMode::Supplied, ..seeded(1) };

        let good = array![[0.0, 0.0], [0.9, 0.1], [0.1, 0.9], [1.0, 1.0]];
        model.transform(Some(good.view()), &opts).unwrap();

        let short = array![[0.0, 0.0], [0.9, 0.1], [0.1, 0.9]];
        let err = model.transform(Some(short.view()), &opts).unwrap_err();
        assert_eq!(err, ProjectionError::RowCountMismatch { expected: 4, actual: 3 });
    }

    // Purpose
    // -------
    // A pinned fixed axis survives the whole transform and its length is
    // checked against the fitted count.
    //
    // Given
    // -----
    // - A 3D transform pinning z to 1..4, then a 2-long axis.
    //
    // Expect
    // ------
    // - Output z column exactly 1..4; the short axis reports
    //   FixedAxisLength.
    #[test]
    fn fixed_axis_is_pinned_through_the_run() {
        let mut model = ForceScheme::with_defaults();
        model.fit(square_samples().view()).unwrap();

        let opts = TransformOptions::new(
            3,
            InitMode::Random,
            Some(5),
            Some(array![1.0, 2.0, 3.0, 4.0]),
        )
        .unwrap();
        let (projection, _) = model.transform(None, &opts).unwrap();
        assert_eq!(projection.column(2).to_vec(), vec![1.0, 2.0, 3.0, 4.0]);

        let bad = TransformOptions::new(3, InitMode::Random, Some(5), Some(array![1.0, 2.0]))
            .unwrap();
        let err = model.transform(None, &bad).unwrap_err();
        assert_eq!(err, ProjectionError::FixedAxisLength { expected: 4, actual: 2 });
    }

    // Purpose
    // -------
    // Scoring must honor a caller-supplied matrix instead of silently
    // using the fitted one.
    //
    // Given
    // -----
    // - A fitted unit-square matrix, a perfect layout for it, and a
    //   deliberately different supplied matrix.
    //
    // Expect
    // ------
    // - Stress 0 against the fitted matrix; nonzero against the supplied
    //   one.
    #[test]
    fn score_honors_the_supplied_matrix() {
        let mut model = ForceScheme::with_defaults();
        let samples = square_samples();
        model.fit(samples.view()).unwrap();

        let fitted_score = model.score(samples.view(), None).unwrap();
        assert!(fitted_score.abs() < 1e-12);

        let doubled = CondensedDistances::from_samples((&samples * 2.0).view(), &Metric::default())
            .unwrap();
        let supplied_score = model.score(samples.view(), Some(&doubled)).unwrap();
        assert!(supplied_score > 0.1);
    }

    // Purpose
    // -------
    // Refitting must clear the previous run summary.
    //
    // Given
    // -----
    // - An estimator with a cached outcome.
    //
    // Expect
    // ------
    // - `outcome` is None right after the second fit.
    #[test]
    fn refit_clears_the_cached_outcome() {
        let mut model = ForceScheme::with_defaults();
        model.fit(square_samples().view()).unwrap();
        model.transform(None, &seeded(3)).unwrap();
        assert!(model.outcome.is_some());

        model.fit(square_samples().view()).unwrap();
        assert!(model.outcome.is_none());
    }
}

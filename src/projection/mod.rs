//! projection — force-directed multidimensional projection.
//!
//! Purpose
//! -------
//! Project high-dimensional samples (or a precomputed distance matrix)
//! into 2 or 3 dimensions while preserving pairwise distances as well as
//! possible. The layer is split the usual way: validated building blocks
//! in `core`, the user-facing estimator in `models`, and one error
//! surface in `errors`.
//!
//! Key behaviors
//! -------------
//! - [`models::ForceScheme`] separates the quadratic-cost `fit` (distance
//!   matrix construction) from the iterative `transform` (force-directed
//!   refinement), so one matrix serves many layouts.
//! - Distances live in condensed upper-triangular form,
//!   `n * (n - 1) / 2` values for `n` samples, with an explicit index
//!   bijection instead of a square matrix.
//! - Every run is reproducible from a seed: starting layout, visit
//!   orders, and engine scheduling all derive from one generator.
//!
//! Invariants & assumptions
//! ------------------------
//! - Distance values are finite and non-negative once constructed;
//!   violations are construction-time errors, never latent state.
//! - Output layouts are `n x 2` or `n x 3`, each free column shifted to a
//!   zero minimum after the run.
//!
//! Conventions
//! -----------
//! - Public entrypoints that can fail return
//!   [`errors::ProjectionResult`]; engine, scoring, and persistence
//!   failures arrive wrapped in [`errors::ProjectionError`] variants.
//! - Validation happens before any estimator state changes, so a failed
//!   call leaves the model exactly as it was.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: build a [`models::ForceScheme`], `fit` samples,
//!   `transform` with a seed, `score` the layout, and optionally `save`
//!   the matrix for later sessions.
//! - Front-ends usually import `projection::prelude::*` for the everyday
//!   surface.
//!
//! Testing notes
//! -------------
//! - Submodule tests pin down construction validation, the index
//!   bijection, initialization determinism, and the estimator state
//!   machine; end-to-end convergence and persistence flows live in the
//!   integration tests.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------
//
// The everyday types most users need. Specialized pieces (bijection
// helpers, individual metric functions) remain under `core`.

pub use self::core::{
    CondensedDistances, EngineChoice, InitMode, Metric, MetricKind, SchemeOptions,
    TargetDimension, TransformOptions,
};

pub use self::errors::{ProjectionError, ProjectionResult};

pub use self::models::ForceScheme;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use force_scheme::projection::prelude::*;
//
// to import the main projection surface in a single line, without pulling
// in lower-level internals.

pub mod prelude {
    pub use super::{
        CondensedDistances, EngineChoice, ForceScheme, InitMode, Metric, MetricKind,
        ProjectionError, ProjectionResult, SchemeOptions, TargetDimension, TransformOptions,
    };
}

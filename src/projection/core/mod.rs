//! core — distance storage, metrics, options, and layout initialization.
//!
//! Purpose
//! -------
//! Provide the validated building blocks the estimator composes: the
//! condensed pairwise distance store and its index bijection
//! (`condensed`), the named distance metrics (`metric`), the validated
//! option types (`options`), and the starting-layout strategies with the
//! run's seedable randomness (`init`).
//!
//! Key behaviors
//! -------------
//! - Construction is validation: every public constructor checks shapes,
//!   finiteness, and ranges, so code holding a core value never re-checks
//!   it.
//! - The condensed store is immutable after construction; lookups go
//!   through the `(i, j) <-> offset` bijection and the diagonal is an
//!   implicit zero.
//! - All randomness flows through a `ChaCha8` generator built from an
//!   optional seed, making whole runs reproducible.
//!
//! Invariants & assumptions
//! ------------------------
//! - A matrix over `n` samples stores exactly `n * (n - 1) / 2` values,
//!   each finite and non-negative; `n >= 2`.
//! - Target dimensionality is 2 or 3 by type; nothing downstream handles
//!   other widths.
//!
//! Conventions
//! -----------
//! - Metric routines take two `ndarray` row views and return a scalar;
//!   unusual inputs (zero-norm cosine) surface as NaN and are caught by
//!   matrix validation, not inside the metric.
//! - Errors are [`ProjectionError`](crate::projection::errors::ProjectionError)
//!   values from the shared projection surface.

pub mod condensed;
pub mod init;
pub mod metric;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------
//
// The everyday types. Lower-level pieces (the raw bijection helpers, the
// individual metric functions) stay under their submodules.

pub use self::condensed::{CondensedDistances, condensed_len, pair_at, pair_offset};
pub use self::init::{initial_projection, make_rng, pca_projection, pin_fixed_axis, visit_order};
pub use self::metric::{Metric, MetricFn, MetricKind};
pub use self::options::{
    EngineChoice, InitMode, SchemeOptions, TargetDimension, TransformOptions,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use force_scheme::projection::core::prelude::*;
//
// to import the core surface in a single line.

pub mod prelude {
    pub use super::{
        CondensedDistances, EngineChoice, InitMode, Metric, MetricKind, SchemeOptions,
        TargetDimension, TransformOptions,
    };
}

//! engine — iteration backends, learning-rate schedule, and convergence loop.
//!
//! Purpose
//! -------
//! Provide the numerical heart of the projection: the per-sweep force
//! arithmetic, interchangeable sweep engines (sequential and parallel), the
//! decaying learning-rate schedule, and the monitor that drives sweeps to
//! convergence. Estimator code composes these pieces; nothing here knows
//! about metrics, initialization, or persistence.
//!
//! Key behaviors
//! -------------
//! - A single shared force kernel ([`traits::force_step`]) so both engines
//!   agree bit-for-bit on per-pair arithmetic; engines differ only in when
//!   updates become visible.
//! - [`sequential::SequentialEngine`] applies updates immediately
//!   (reference semantics); [`parallel::ParallelEngine`] batches a whole
//!   sweep against a snapshot on a private rayon pool.
//! - [`monitor::run_sweeps`] owns termination: the error-delta tolerance
//!   check, the sweep budget, diagnostics events, and the final shift of
//!   every free axis to a zero minimum.
//!
//! Invariants & assumptions
//! ------------------------
//! - Distances are validated before they reach an engine; sweeps assume
//!   finite, non-negative entries and spend no cycles re-checking them.
//! - Projections are `n x 2` or `n x 3`; the monitor rejects anything else
//!   before the first sweep.
//! - When an axis is pinned it is excluded from updates and from the final
//!   shift, but still contributes to every distance read.
//!
//! Conventions
//! -----------
//! - Sweep errors are means over ordered pairs, `n * (n - 1)` terms, so
//!   both visit directions of a pair count.
//! - Construction failures (thread pools) surface as
//!   [`errors::EngineError`]; numerical state never panics in release
//!   builds.
//!
//! Testing notes
//! -------------
//! - Engine tests pin down per-sweep arithmetic with hand-computed cases
//!   and the visibility difference between the two engines; monitor tests
//!   own termination, shifting, and validation; schedule tests own the
//!   decay curve.

pub mod errors;
pub mod monitor;
pub mod parallel;
pub mod schedule;
pub mod sequential;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------
//
// The pieces estimator code composes directly. The shared force kernel and
// the snapshot internals stay under their submodules.

pub use self::errors::{EngineError, EngineResult};
pub use self::monitor::{RunOutcome, RunSpec, TerminationStatus, run_sweeps};
pub use self::parallel::ParallelEngine;
pub use self::schedule::LearningSchedule;
pub use self::sequential::SequentialEngine;
pub use self::traits::{MIN_DISTANCE, SweepContext, SweepEngine};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use force_scheme::engine::prelude::*;
//
// to import the engine surface in a single line.

pub mod prelude {
    pub use super::{
        EngineError, EngineResult, LearningSchedule, ParallelEngine, RunOutcome, RunSpec,
        SequentialEngine, SweepContext, SweepEngine, TerminationStatus, run_sweeps,
    };
}

//! scoring — layout quality measures.
//!
//! Purpose
//! -------
//! Quantify how faithfully a finished layout reproduces the stored
//! pairwise distances. The only measure currently offered is Kruskal
//! stress-1 (`stress::kruskal_stress`), the standard figure of merit for
//! distance-preserving projections.
//!
//! Key behaviors
//! -------------
//! - Scores are pure functions of a distance matrix and a layout; they
//!   never mutate either and carry no estimator state.
//! - Validation failures surface as [`errors::ScoreError`], keeping NaN
//!   out of reported scores.
//!
//! Conventions
//! -----------
//! - 0 is perfect, 1 is the collapsed-layout anchor; an all-zero distance
//!   matrix scores 0 by convention.

pub mod errors;
pub mod stress;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ScoreError, ScoreResult};
pub use self::stress::kruskal_stress;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use force_scheme::scoring::prelude::*;
//
// to import the scoring surface in a single line.

pub mod prelude {
    pub use super::{ScoreError, ScoreResult, kruskal_stress};
}

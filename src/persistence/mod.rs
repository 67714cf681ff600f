//! persistence — saving and loading condensed distance matrices.
//!
//! Purpose
//! -------
//! Move distance matrices between memory and disk so an expensive
//! computation can be paid once. Two formats are supported: a compact
//! binary store (`binary`) whose round-trips are bit-exact, and a
//! human-editable upper-triangular text format (`text`, read-only).
//!
//! Key behaviors
//! -------------
//! - Both loaders rebuild matrices through the validating constructor, so
//!   nothing read from disk can bypass the invariants of in-memory
//!   construction.
//! - I/O and codec failures are normalized into [`errors::PersistError`]
//!   with string reasons; the error type stays cloneable and comparable.
//!
//! Conventions
//! -----------
//! - The binary format is the only writer; the text format exists for
//!   matrices produced by other tools.
//! - Text error positions are 1-based raw file lines; line 0 denotes a
//!   whole-file condition.

pub mod binary;
pub mod errors;
pub mod text;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::binary::{load_condensed, save_condensed};
pub use self::errors::{PersistError, PersistResult};
pub use self::text::read_distance_text;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use force_scheme::persistence::prelude::*;
//
// to import the persistence surface in a single line.

pub mod prelude {
    pub use super::{
        PersistError, PersistResult, load_condensed, read_distance_text, save_condensed,
    };
}

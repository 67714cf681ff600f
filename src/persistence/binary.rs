//! Binary store for condensed distance matrices.
//!
//! The on-disk layout is a bincode-encoded record of the sample count (as
//! `u64`, so 32- and 64-bit builds agree on the format) followed by the
//! condensed values. Loading re-validates through the same constructor the
//! in-memory path uses, so a tampered or truncated file can never produce
//! a matrix the estimator would reject when built directly.
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::errors::{PersistError, PersistResult};
use crate::projection::core::condensed::CondensedDistances;
use crate::projection::errors::ProjectionError;

#[derive(Debug, Serialize, Deserialize)]
struct StoredDistances {
    n: u64,
    values: Vec<f64>,
}

/// Writes a condensed distance matrix to `path`, replacing any existing
/// file.
///
/// # Errors
/// - [`PersistError::Io`]: the file could not be created or written.
/// - [`PersistError::Codec`]: encoding failed.
pub fn save_condensed(distances: &CondensedDistances, path: &Path) -> PersistResult<()> {
    let stored =
        StoredDistances { n: distances.n() as u64, values: distances.values().to_vec() };
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, &stored)?;
    Ok(())
}

/// Reads a condensed distance matrix previously written by
/// [`save_condensed`].
///
/// Values round-trip bit-for-bit; saving and loading never perturbs a
/// distance.
///
/// # Errors
/// - [`PersistError::Io`]: the file could not be opened or read.
/// - [`PersistError::Codec`]: the bytes do not decode as a stored matrix,
///   or a decoded distance is negative or non-finite.
/// - [`PersistError::LengthMismatch`]: the decoded value count disagrees
///   with the decoded sample count.
pub fn load_condensed(path: &Path) -> PersistResult<CondensedDistances> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let stored: StoredDistances = bincode::deserialize_from(reader)?;
    rebuild(stored)
}

fn rebuild(stored: StoredDistances) -> PersistResult<CondensedDistances> {
    CondensedDistances::from_parts(stored.n as usize, stored.values).map_err(|err| match err {
        ProjectionError::LengthMismatch { expected, actual } => {
            PersistError::LengthMismatch { expected, actual }
        }
        other => PersistError::Codec { reason: other.to_string() },
    })
}

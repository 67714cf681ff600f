//! Run-start construction: seeded RNG, starting projection, visit order,
//! and fixed-axis pinning.
//!
//! Purpose
//! -------
//! Everything a transform needs before the first sweep lives here. The
//! starting projection comes from the configured [`InitMode`]: uniform
//! random coordinates, a caller-supplied `n x d` start, or an in-crate PCA
//! reduction of the sample matrix. The visit order is one permutation drawn
//! per run, never re-shuffled between sweeps.
//!
//! Conventions
//! -----------
//! - All randomness flows through one `ChaCha8Rng` per run; a fixed seed
//!   reproduces the starting projection and the visit order exactly.
//! - PCA components are ordered by descending eigenvalue with a
//!   deterministic sign (the entry of largest magnitude is non-negative),
//!   so seeded runs stay reproducible across platforms.
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2, ArrayView2};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::projection::core::options::{InitMode, TargetDimension};
use crate::projection::errors::{ProjectionError, ProjectionResult};

/// Build the run's generator: seeded for reproducibility, or from entropy.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Draw the sweep visit order: one permutation of `0..n` per run.
pub fn visit_order(n: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// Uniform `[0, 1)` starting projection of shape `n x d`.
pub fn random_projection(n: usize, d: usize, rng: &mut ChaCha8Rng) -> Array2<f64> {
    Array2::from_shape_fn((n, d), |_| rng.gen::<f64>())
}

/// Build the starting projection for a run.
///
/// # Arguments
/// - `n`: fitted sample count the projection must match.
/// - `dimension`: target dimensionality.
/// - `init`: starting-projection strategy.
/// - `initial`: the matrix argument of `transform` — the `n x d` start for
///   [`InitMode::Supplied`], the `n x features` samples for
///   [`InitMode::Pca`], ignored for [`InitMode::Random`].
/// - `rng`: the run's generator.
///
/// # Errors
/// - [`ProjectionError::MissingInitial`] when `Supplied`/`Pca` get no
///   matrix.
/// - [`ProjectionError::RowCountMismatch`] /
///   [`ProjectionError::ColumnCountMismatch`] on shape violations.
/// - [`ProjectionError::InvalidOption`] on a non-finite supplied value.
pub fn initial_projection(
    n: usize, dimension: TargetDimension, init: InitMode, initial: Option<ArrayView2<'_, f64>>,
    rng: &mut ChaCha8Rng,
) -> ProjectionResult<Array2<f64>> {
    let d = dimension.as_usize();
    match init {
        InitMode::Random => Ok(random_projection(n, d, rng)),
        InitMode::Supplied => {
            let start = initial.ok_or(ProjectionError::MissingInitial { mode: "supplied" })?;
            check_rows(start, n)?;
            if start.ncols() != d {
                return Err(ProjectionError::ColumnCountMismatch {
                    expected: d,
                    actual: start.ncols(),
                });
            }
            check_finite(start, "initial")?;
            Ok(start.to_owned())
        }
        InitMode::Pca => {
            let samples = initial.ok_or(ProjectionError::MissingInitial { mode: "pca" })?;
            check_rows(samples, n)?;
            if samples.ncols() < d {
                return Err(ProjectionError::ColumnCountMismatch {
                    expected: d,
                    actual: samples.ncols(),
                });
            }
            check_finite(samples, "samples")?;
            Ok(pca_projection(samples, d))
        }
    }
}

fn check_rows(matrix: ArrayView2<'_, f64>, n: usize) -> ProjectionResult<()> {
    if matrix.nrows() != n {
        return Err(ProjectionError::RowCountMismatch { expected: n, actual: matrix.nrows() });
    }
    Ok(())
}

fn check_finite(matrix: ArrayView2<'_, f64>, name: &'static str) -> ProjectionResult<()> {
    for &value in matrix.iter() {
        if !value.is_finite() {
            return Err(ProjectionError::InvalidOption { name, value, reason: "finite" });
        }
    }
    Ok(())
}

/// Project samples onto their top `d` principal components.
///
/// Column-centers the input, forms the `features x features` covariance
/// `B^T B / (n - 1)`, eigen-decomposes it with `nalgebra`, and projects the
/// centered rows onto the `d` leading eigenvectors (descending eigenvalue
/// order, largest-magnitude entry made non-negative).
///
/// Callers guarantee `nrows >= 2`, `ncols >= d`, and finite values.
pub fn pca_projection(samples: ArrayView2<'_, f64>, d: usize) -> Array2<f64> {
    let n = samples.nrows();
    let features = samples.ncols();

    let mut means = vec![0.0; features];
    for row in samples.rows() {
        for (p, &value) in row.iter().enumerate() {
            means[p] += value;
        }
    }
    for mean in means.iter_mut() {
        *mean /= n as f64;
    }

    // Covariance of the centered data, written straight into nalgebra's
    // column-major storage.
    let mut cov = DMatrix::<f64>::zeros(features, features);
    let denom = (n - 1) as f64;
    for p in 0..features {
        for q in p..features {
            let mut acc = 0.0;
            for i in 0..n {
                acc += (samples[(i, p)] - means[p]) * (samples[(i, q)] - means[q]);
            }
            let value = acc / denom;
            cov[(p, q)] = value;
            cov[(q, p)] = value;
        }
    }

    let eigen = SymmetricEigen::new(cov);

    // Descending eigenvalue order; nalgebra returns them unsorted.
    let mut order: Vec<usize> = (0..features).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut components = Array2::<f64>::zeros((d, features));
    for (k, &col) in order.iter().take(d).enumerate() {
        let column = eigen.eigenvectors.column(col);
        let mut lead = 0;
        for (p, value) in column.iter().enumerate() {
            if value.abs() > column[lead].abs() {
                lead = p;
            }
        }
        let sign = if column[lead] < 0.0 { -1.0 } else { 1.0 };
        for (p, value) in column.iter().enumerate() {
            components[(k, p)] = sign * value;
        }
    }

    let mut projection = Array2::<f64>::zeros((n, d));
    for i in 0..n {
        for k in 0..d {
            let mut acc = 0.0;
            for p in 0..features {
                acc += (samples[(i, p)] - means[p]) * components[(k, p)];
            }
            projection[(i, k)] = acc;
        }
    }
    projection
}

/// Pin the last projection column to caller-supplied values.
///
/// # Errors
/// - [`ProjectionError::FixedAxisLength`] when `values.len()` does not
///   match the projection's row count.
pub fn pin_fixed_axis(
    projection: &mut Array2<f64>, values: &Array1<f64>,
) -> ProjectionResult<()> {
    let n = projection.nrows();
    if values.len() != n {
        return Err(ProjectionError::FixedAxisLength { expected: n, actual: values.len() });
    }
    let last = projection.ncols() - 1;
    for (i, &value) in values.iter().enumerate() {
        projection[(i, last)] = value;
    }
    Ok(())
}

//! Condensed pairwise-distance storage for Force Scheme projections.
//!
//! Purpose
//! -------
//! Provide the validated, immutable store of all pairwise distances for `n`
//! samples, holding only the upper triangle (`n(n-1)/2` values) with an
//! explicit, tested bijection between sample pairs and linear offsets. This
//! module centralizes distance validation so downstream code can assume a
//! clean, fully built matrix.
//!
//! Key behaviors
//! -------------
//! - [`pair_offset`] / [`pair_at`] form the `(i, j) <-> offset` bijection and
//!   double as the serialization contract for persistence.
//! - [`CondensedDistances::from_samples`] evaluates a [`Metric`] over all
//!   pairs in `O(n^2)` and fails as a whole on any invalid output; with the
//!   `precomputed` metric it condenses a square input instead.
//! - [`CondensedDistances::from_parts`] rebuilds a store from persisted raw
//!   parts, re-validating length and values.
//!
//! Invariants & assumptions
//! ------------------------
//! - `values.len() == n * (n - 1) / 2` and `n >= 2`.
//! - Every stored distance is finite and non-negative.
//! - The store is immutable once built; re-fitting creates a new store.
//! - Metric symmetry is required but not re-verified; a non-symmetric custom
//!   metric corrupts the projection without a build-time error.
//!
//! Conventions
//! -----------
//! - Pairs are stored row-major by the smaller index: `(0,1), (0,2), ...,
//!   (0,n-1), (1,2), ...`. The diagonal is implicitly zero.
//! - Indices are 0-based throughout.
use ndarray::ArrayView2;

use crate::projection::core::metric::Metric;
use crate::projection::errors::{ProjectionError, ProjectionResult};

/// Number of stored pairs for `n` samples: `n(n-1)/2`.
pub fn condensed_len(n: usize) -> usize {
    n * (n - 1) / 2
}

/// Linear offset of the pair `(i, j)`, `i != j`, in a condensed store for
/// `n` samples.
///
/// Argument order is normalized internally, so `pair_offset(n, i, j)` and
/// `pair_offset(n, j, i)` agree. For `lo = min(i, j)`, `hi = max(i, j)` the
/// mapping is `lo * n - lo * (lo + 1) / 2 + (hi - lo - 1)`.
///
/// # Panics
/// - If `i == j` or either index is `>= n` (debug assertions; release builds
///   would read a wrong offset, so callers validate indices up front).
pub fn pair_offset(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i != j, "diagonal pairs are not stored");
    debug_assert!(i < n && j < n, "pair index out of range");
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    lo * n - lo * (lo + 1) / 2 + (hi - lo - 1)
}

/// Inverse of [`pair_offset`]: the pair `(i, j)`, `i < j`, stored at
/// `offset` in a condensed store for `n` samples.
///
/// The row index solves the quadratic row-start equation
/// `s(i) = i * n - i * (i + 1) / 2 <= offset`; the floating-point root is
/// clamped and then corrected by at most one step in each direction, so the
/// result is exact for every valid offset.
///
/// # Panics
/// - If `offset >= condensed_len(n)` (debug assertion).
pub fn pair_at(n: usize, offset: usize) -> (usize, usize) {
    debug_assert!(offset < condensed_len(n), "offset out of range");
    let row_start = |i: usize| i * n - i * (i + 1) / 2;

    let b = (2 * n - 1) as f64;
    let disc = (b * b - 8.0 * offset as f64).max(0.0);
    let mut i = ((b - disc.sqrt()) / 2.0).floor() as usize;
    i = i.min(n - 2);
    while i > 0 && row_start(i) > offset {
        i -= 1;
    }
    while i + 1 <= n - 2 && row_start(i + 1) <= offset {
        i += 1;
    }

    let j = offset - row_start(i) + i + 1;
    (i, j)
}

/// `CondensedDistances` — validated condensed pairwise-distance matrix.
///
/// Purpose
/// -------
/// Own the upper-triangular pairwise distances for a fitted sample set,
/// together with the logical sample count `n` that pair indexing needs.
/// This is the only state that outlives a transform call: independent
/// transforms (different seeds, dimensions, or engines) share it read-only.
///
/// Key behaviors
/// -------------
/// - Built once per fit via [`CondensedDistances::from_samples`] (or the
///   square/persisted variants) and never mutated afterwards.
/// - [`CondensedDistances::get`] answers symmetric lookups, returning `0.0`
///   on the diagonal.
/// - [`CondensedDistances::footprint_bytes`] supports the fit-time memory
///   diagnostic.
///
/// Fields
/// ------
/// - `n`: `usize`
///   Logical sample count; stored explicitly so persistence never has to
///   invert `len = n(n-1)/2`.
/// - `values`: `Vec<f64>`
///   The `n(n-1)/2` distances in [`pair_offset`] order; finite and
///   non-negative.
///
/// Invariants
/// ----------
/// - `n >= 2` and `values.len() == condensed_len(n)`.
/// - All values are finite and non-negative.
/// - Fields are private; no mutation after construction.
///
/// Performance
/// -----------
/// - Construction is `O(n^2)` metric evaluations and one allocation of
///   `n(n-1)/2` doubles (half the memory of a full square matrix).
/// - `get` is O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedDistances {
    n: usize,
    values: Vec<f64>,
}

impl CondensedDistances {
    /// Build the condensed matrix from fit input under the given metric.
    ///
    /// For a function-backed metric, `samples` is an `n x features` matrix
    /// and every unordered pair is evaluated once. For the `precomputed`
    /// metric this delegates to [`CondensedDistances::from_square`] and
    /// `samples` must be the `n x n` distance matrix itself.
    ///
    /// # Errors
    /// - [`ProjectionError::TooFewSamples`] when `n < 2`.
    /// - [`ProjectionError::InvalidDistance`] when the metric produces a
    ///   NaN, infinite, or negative value for some pair; the build fails as
    ///   a whole, never partially.
    /// - [`ProjectionError::NotSquare`] on the precomputed path when the
    ///   input is not square.
    pub fn from_samples(samples: ArrayView2<'_, f64>, metric: &Metric) -> ProjectionResult<Self> {
        let func = match metric.func() {
            Some(f) => f,
            None => return Self::from_square(samples),
        };

        let n = samples.nrows();
        if n < 2 {
            return Err(ProjectionError::TooFewSamples { n });
        }

        let mut values = Vec::with_capacity(condensed_len(n));
        for i in 0..n {
            for j in (i + 1)..n {
                let value = func(samples.row(i), samples.row(j));
                if !value.is_finite() || value < 0.0 {
                    return Err(ProjectionError::InvalidDistance { i, j, value });
                }
                values.push(value);
            }
        }
        Ok(CondensedDistances { n, values })
    }

    /// Condense a square distance matrix (the `precomputed` fit path).
    ///
    /// Only the upper triangle is read; symmetry of the input is required
    /// but not re-verified.
    ///
    /// # Errors
    /// - [`ProjectionError::NotSquare`] when `rows != cols`.
    /// - [`ProjectionError::TooFewSamples`] when `n < 2`.
    /// - [`ProjectionError::InvalidDistance`] on a NaN, infinite, or
    ///   negative entry.
    pub fn from_square(matrix: ArrayView2<'_, f64>) -> ProjectionResult<Self> {
        let (rows, cols) = (matrix.nrows(), matrix.ncols());
        if rows != cols {
            return Err(ProjectionError::NotSquare { rows, cols });
        }
        if rows < 2 {
            return Err(ProjectionError::TooFewSamples { n: rows });
        }

        let n = rows;
        let mut values = Vec::with_capacity(condensed_len(n));
        for i in 0..n {
            for j in (i + 1)..n {
                let value = matrix[(i, j)];
                if !value.is_finite() || value < 0.0 {
                    return Err(ProjectionError::InvalidDistance { i, j, value });
                }
                values.push(value);
            }
        }
        Ok(CondensedDistances { n, values })
    }

    /// Rebuild a store from raw parts (the persistence load path).
    ///
    /// # Errors
    /// - [`ProjectionError::TooFewSamples`] when `n < 2`.
    /// - [`ProjectionError::LengthMismatch`] when `values.len()` is not
    ///   `n(n-1)/2`.
    /// - [`ProjectionError::InvalidDistance`] on a NaN, infinite, or
    ///   negative stored value, reported at its decoded pair.
    pub fn from_parts(n: usize, values: Vec<f64>) -> ProjectionResult<Self> {
        if n < 2 {
            return Err(ProjectionError::TooFewSamples { n });
        }
        let expected = condensed_len(n);
        if values.len() != expected {
            return Err(ProjectionError::LengthMismatch { expected, actual: values.len() });
        }
        for (offset, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                let (i, j) = pair_at(n, offset);
                return Err(ProjectionError::InvalidDistance { i, j, value });
            }
        }
        Ok(CondensedDistances { n, values })
    }

    /// Logical sample count.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of stored pairs, `n(n-1)/2`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no pairs. Never true for a built store
    /// (`n >= 2` implies at least one pair); present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distance between samples `i` and `j`; `0.0` when `i == j`.
    ///
    /// # Panics
    /// - If either index is `>= n`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "pair index out of range");
        if i == j {
            return 0.0;
        }
        self.values[pair_offset(self.n, i, j)]
    }

    /// The stored distances in [`pair_offset`] order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Heap footprint of the stored distances, for the fit-time diagnostic.
    pub fn footprint_bytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<f64>()
    }

    /// Decompose into `(n, values)` without copying (the persistence save
    /// path clones instead; this serves callers done with the store).
    pub fn into_parts(self) -> (usize, Vec<f64>) {
        (self.n, self.values)
    }
}

//! Kruskal stress-1 between stored distances and a finished layout.
use ndarray::ArrayView2;

use crate::projection::core::condensed::CondensedDistances;
use crate::scoring::errors::{ScoreError, ScoreResult};

/// Computes Kruskal stress-1 of a projection against stored distances.
///
/// Stress is `sqrt(sum (D_ij - d_ij)^2 / sum D_ij^2)` over unordered
/// pairs, where `D_ij` is the stored distance and `d_ij` the Euclidean
/// distance in the layout over all of its columns, pinned or not. A value
/// of 0 means the layout reproduces the stored distances exactly; a layout
/// collapsed to a single point scores exactly 1.
///
/// # Arguments
/// - `distances`: the stored pairwise distances being reproduced.
/// - `projection`: the layout to score, one row per sample.
///
/// # Returns
/// - `Ok(stress)`: non-negative; 0.0 when every stored distance is zero,
///   since there is nothing to misrepresent.
///
/// # Errors
/// - [`ScoreError::SampleCountMismatch`]: row count differs from the
///   stored sample count.
/// - [`ScoreError::NonFiniteProjection`]: a row contains NaN or infinity.
pub fn kruskal_stress(
    distances: &CondensedDistances,
    projection: ArrayView2<'_, f64>,
) -> ScoreResult<f64> {
    let n = distances.n();
    if projection.nrows() != n {
        return Err(ScoreError::SampleCountMismatch { expected: n, actual: projection.nrows() });
    }
    for (row, point) in projection.rows().into_iter().enumerate() {
        if point.iter().any(|v| !v.is_finite()) {
            return Err(ScoreError::NonFiniteProjection { row });
        }
    }

    let mut num = 0.0;
    let mut den = 0.0;
    for i in 0..n {
        let pi = projection.row(i);
        for j in (i + 1)..n {
            let target = distances.get(i, j);
            let gap: f64 = pi
                .iter()
                .zip(projection.row(j).iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            let projected = gap.sqrt();
            num += (target - projected) * (target - projected);
            den += target * target;
        }
    }

    if den == 0.0 {
        return Ok(0.0);
    }
    Ok((num / den).sqrt())
}

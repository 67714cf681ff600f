//! Distance metrics for building the condensed pairwise matrix.
//!
//! Metrics are modeled as a named registry of pure functions with the
//! contract `(vector, vector) -> non-negative scalar`. Built-ins resolve by
//! name through [`MetricKind`]; callers extend the registry by wrapping their
//! own function with [`Metric::custom`] rather than implementing a trait.
//!
//! The `precomputed` pseudo-metric has no function: it switches the fit path
//! to read a square distance matrix directly instead of evaluating pairs.
//!
//! ## Conventions
//! - All built-ins are total over finite inputs and symmetric under argument
//!   swap; symmetry of custom functions is required but not re-verified.
//! - A metric returning NaN, ±inf, or a negative value aborts the matrix
//!   build with [`ProjectionError::InvalidDistance`]; there is no per-pair
//!   recovery.
use std::str::FromStr;

use ndarray::ArrayView1;

use crate::projection::errors::{ProjectionError, ProjectionResult};

/// Signature shared by every registered distance function.
pub type MetricFn = fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64;

/// Built-in metric names.
///
/// `Precomputed` is a fit-path switch, not a distance function: the input to
/// `fit` is then interpreted as an `n x n` square distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Euclidean,
    SqEuclidean,
    Manhattan,
    Chebyshev,
    Cosine,
    Canberra,
    Precomputed,
}

impl MetricKind {
    /// Canonical lowercase name of this metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Euclidean => "euclidean",
            MetricKind::SqEuclidean => "sqeuclidean",
            MetricKind::Manhattan => "manhattan",
            MetricKind::Chebyshev => "chebyshev",
            MetricKind::Cosine => "cosine",
            MetricKind::Canberra => "canberra",
            MetricKind::Precomputed => "precomputed",
        }
    }
}

impl FromStr for MetricKind {
    type Err = ProjectionError;

    /// Parse a metric choice from a string (case-insensitive).
    ///
    /// Accepts the canonical names plus the common aliases `l2`, `l1`, and
    /// `cityblock`. Any other value returns
    /// [`ProjectionError::UnknownMetric`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" => Ok(MetricKind::Euclidean),
            "sqeuclidean" => Ok(MetricKind::SqEuclidean),
            "manhattan" | "cityblock" | "l1" => Ok(MetricKind::Manhattan),
            "chebyshev" => Ok(MetricKind::Chebyshev),
            "cosine" => Ok(MetricKind::Cosine),
            "canberra" => Ok(MetricKind::Canberra),
            "precomputed" => Ok(MetricKind::Precomputed),
            _ => Err(ProjectionError::UnknownMetric { name: s.to_string() }),
        }
    }
}

// ---- Resolved metric -------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Routine {
    Func(MetricFn),
    Precomputed,
}

/// A named, resolved distance function.
///
/// Holds the function pointer evaluated for every sample pair during the
/// matrix build, or the `precomputed` marker. Cheap to clone; comparison is
/// by name and function address.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    routine: Routine,
}

impl Metric {
    /// Resolve a metric by name.
    ///
    /// # Errors
    /// - [`ProjectionError::UnknownMetric`] when the name is not registered.
    pub fn from_name(name: &str) -> ProjectionResult<Metric> {
        Ok(Metric::from_kind(MetricKind::from_str(name)?))
    }

    /// Resolve a built-in metric.
    pub fn from_kind(kind: MetricKind) -> Metric {
        let routine = match kind {
            MetricKind::Euclidean => Routine::Func(euclidean),
            MetricKind::SqEuclidean => Routine::Func(sqeuclidean),
            MetricKind::Manhattan => Routine::Func(manhattan),
            MetricKind::Chebyshev => Routine::Func(chebyshev),
            MetricKind::Cosine => Routine::Func(cosine),
            MetricKind::Canberra => Routine::Func(canberra),
            MetricKind::Precomputed => Routine::Precomputed,
        };
        Metric { name: kind.as_str().to_string(), routine }
    }

    /// Register a caller-supplied distance function under a display name.
    ///
    /// The function must be total over the caller's feature vectors,
    /// non-negative, and symmetric; the matrix build validates the first two
    /// per pair and rejects violations as a whole.
    pub fn custom(name: impl Into<String>, func: MetricFn) -> Metric {
        Metric { name: name.into(), routine: Routine::Func(func) }
    }

    /// Display name of this metric.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this metric switches the fit path to a square distance input.
    pub fn is_precomputed(&self) -> bool {
        matches!(self.routine, Routine::Precomputed)
    }

    /// The registered function, or `None` for `precomputed`.
    pub fn func(&self) -> Option<MetricFn> {
        match self.routine {
            Routine::Func(f) => Some(f),
            Routine::Precomputed => None,
        }
    }
}

impl Default for Metric {
    /// The original default: Euclidean distance.
    fn default() -> Metric {
        Metric::from_kind(MetricKind::Euclidean)
    }
}

// ---- Built-in distance functions -------------------------------------------

/// Euclidean (L2) distance: `sqrt(sum((a_k - b_k)^2))`.
pub fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    sqeuclidean(a, b).sqrt()
}

/// Squared Euclidean distance: `sum((a_k - b_k)^2)`.
pub fn sqeuclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Manhattan (cityblock, L1) distance: `sum(|a_k - b_k|)`.
pub fn manhattan(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// Chebyshev (L-infinity) distance: `max(|a_k - b_k|)`.
pub fn chebyshev(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}

/// Cosine distance: `1 - dot(a, b) / (|a| * |b|)`, clamped at zero so
/// floating-point rounding never produces a small negative distance.
///
/// Undefined for a zero-norm vector; returns NaN in that case, which the
/// matrix build rejects as [`ProjectionError::InvalidDistance`].
pub fn cosine(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (1.0 - dot / denom).max(0.0)
}

/// Canberra distance: `sum(|a_k - b_k| / (|a_k| + |b_k|))`, with `0/0`
/// terms contributing zero (the scipy convention).
pub fn canberra(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let denom = x.abs() + y.abs();
            if denom == 0.0 { 0.0 } else { (x - y).abs() / denom }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Name resolution through `MetricKind::from_str` and `Metric::from_name`,
    //   including aliases, case-insensitivity, and the unknown-name error.
    // - Values of every built-in distance function on small hand-checked
    //   vectors.
    // - Custom registration and the `precomputed` switch.
    //
    // These tests intentionally DO NOT cover:
    // - Rejection of NaN/negative metric outputs during a matrix build (owned
    //   by the condensed-matrix tests).
    // -------------------------------------------------------------------------

    // Purpose
    // -------
    // Resolve every canonical name and the documented aliases.
    //
    // Given
    // -----
    // - Canonical names, alias names, and mixed-case spellings.
    //
    // Expect
    // ------
    // - Each resolves to the matching `MetricKind`.
    #[test]
    fn from_str_resolves_names_and_aliases() {
        assert_eq!("euclidean".parse::<MetricKind>().unwrap(), MetricKind::Euclidean);
        assert_eq!("L2".parse::<MetricKind>().unwrap(), MetricKind::Euclidean);
        assert_eq!("cityblock".parse::<MetricKind>().unwrap(), MetricKind::Manhattan);
        assert_eq!("SqEuclidean".parse::<MetricKind>().unwrap(), MetricKind::SqEuclidean);
        assert_eq!("CHEBYSHEV".parse::<MetricKind>().unwrap(), MetricKind::Chebyshev);
        assert_eq!("cosine".parse::<MetricKind>().unwrap(), MetricKind::Cosine);
        assert_eq!("canberra".parse::<MetricKind>().unwrap(), MetricKind::Canberra);
        assert_eq!("precomputed".parse::<MetricKind>().unwrap(), MetricKind::Precomputed);
    }

    // Purpose
    // -------
    // Reject a name that is not in the registry.
    //
    // Given
    // -----
    // - The string "mahalanobis".
    //
    // Expect
    // ------
    // - `ProjectionError::UnknownMetric` carrying the offending name.
    #[test]
    fn from_str_rejects_unknown_name() {
        let err = Metric::from_name("mahalanobis").unwrap_err();
        assert_eq!(err, ProjectionError::UnknownMetric { name: "mahalanobis".to_string() });
    }

    // Purpose
    // -------
    // Check every built-in against hand-computed values.
    //
    // Given
    // -----
    // - a = [1, 2, 3], b = [4, 6, 3].
    //
    // Expect
    // ------
    // - euclidean = 5, sqeuclidean = 25, manhattan = 7, chebyshev = 4.
    #[test]
    fn builtin_values_match_hand_computation() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![4.0, 6.0, 3.0];
        assert!((euclidean(a.view(), b.view()) - 5.0).abs() < 1e-12);
        assert!((sqeuclidean(a.view(), b.view()) - 25.0).abs() < 1e-12);
        assert!((manhattan(a.view(), b.view()) - 7.0).abs() < 1e-12);
        assert!((chebyshev(a.view(), b.view()) - 4.0).abs() < 1e-12);
    }

    // Purpose
    // -------
    // Cosine distance on orthogonal, parallel, and zero vectors.
    //
    // Given
    // -----
    // - Orthogonal unit vectors, identical vectors, and a zero vector.
    //
    // Expect
    // ------
    // - 1.0 for orthogonal, 0.0 for identical, NaN for the zero vector.
    #[test]
    fn cosine_handles_degenerate_vectors() {
        let x = array![1.0, 0.0];
        let y = array![0.0, 1.0];
        assert!((cosine(x.view(), y.view()) - 1.0).abs() < 1e-12);
        assert!(cosine(x.view(), x.view()).abs() < 1e-12);

        let zero = array![0.0, 0.0];
        assert!(cosine(x.view(), zero.view()).is_nan());
    }

    // Purpose
    // -------
    // Canberra skips 0/0 terms instead of producing NaN.
    //
    // Given
    // -----
    // - Vectors sharing a zero coordinate.
    //
    // Expect
    // ------
    // - The shared-zero term contributes 0; the rest sum normally.
    #[test]
    fn canberra_skips_zero_over_zero_terms() {
        let a = array![0.0, 1.0];
        let b = array![0.0, 3.0];
        // |1-3| / (1+3) = 0.5
        assert!((canberra(a.view(), b.view()) - 0.5).abs() < 1e-12);
    }

    // Purpose
    // -------
    // Custom registration produces a usable named metric.
    //
    // Given
    // -----
    // - A hand-written half-Manhattan function registered as "half_l1".
    //
    // Expect
    // ------
    // - The name round-trips and evaluation calls the supplied function.
    #[test]
    fn custom_metric_registers_and_evaluates() {
        fn half_l1(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
            manhattan(a, b) / 2.0
        }
        let metric = Metric::custom("half_l1", half_l1);
        assert_eq!(metric.name(), "half_l1");
        assert!(!metric.is_precomputed());

        let a = array![0.0, 0.0];
        let b = array![2.0, 2.0];
        let f = metric.func().unwrap();
        assert!((f(a.view(), b.view()) - 2.0).abs() < 1e-12);
    }

    // Purpose
    // -------
    // The precomputed pseudo-metric carries no function.
    //
    // Given
    // -----
    // - `Metric::from_kind(MetricKind::Precomputed)`.
    //
    // Expect
    // ------
    // - `is_precomputed` is true and `func()` is `None`.
    #[test]
    fn precomputed_has_no_function() {
        let metric = Metric::from_kind(MetricKind::Precomputed);
        assert!(metric.is_precomputed());
        assert!(metric.func().is_none());
        assert_eq!(metric.name(), "precomputed");
    }
}

//! models — the user-facing projection estimators.
//!
//! Purpose
//! -------
//! House the estimator types built on the core layer. The only model is
//! [`scheme::ForceScheme`], the force-directed projection pipeline; its
//! API follows the fit/transform shape so the expensive distance matrix
//! can be reused across repeated transforms.

pub mod scheme;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::scheme::ForceScheme;

pub mod prelude {
    pub use super::ForceScheme;
}

//! Learning-rate schedule for the sweep loop.
use crate::projection::core::options::SchemeOptions;

/// Decaying per-sweep learning rate.
///
/// `rate(k) = rate0 * (1 - k / max_it)^decay` for sweep index `k`: equal to
/// `rate0` at `k = 0`, decaying toward zero as `k` approaches `max_it`. The
/// loop never evaluates `k = max_it`, so the rate stays strictly positive
/// for every sweep actually run. With `decay = 0` the rate is constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningSchedule {
    rate0: f64,
    decay: f64,
    max_it: usize,
}

impl LearningSchedule {
    /// Build the schedule from validated options.
    pub fn new(options: &SchemeOptions) -> Self {
        LearningSchedule {
            rate0: options.learning_rate0,
            decay: options.decay,
            max_it: options.max_it,
        }
    }

    /// The rate for sweep `k`.
    pub fn rate(&self, sweep: usize) -> f64 {
        let progress = 1.0 - sweep as f64 / self.max_it as f64;
        self.rate0 * progress.powf(self.decay)
    }

    /// The sweep cap this schedule decays toward.
    pub fn max_it(&self) -> usize {
        self.max_it
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The schedule's endpoints and monotone decay.
    // - The constant-rate degenerate case (decay = 0).
    // -------------------------------------------------------------------------

    // Purpose
    // -------
    // The schedule starts at rate0 and decays monotonically.
    //
    // Given
    // -----
    // - rate0 = 0.5, decay = 0.95, max_it = 100 (the defaults).
    //
    // Expect
    // ------
    // - rate(0) == 0.5; rate(k+1) < rate(k) for k < max_it - 1; every rate
    //   within a run is strictly positive.
    #[test]
    fn rate_starts_at_rate0_and_decays() {
        let opts = SchemeOptions::default();
        let schedule = LearningSchedule::new(&opts);

        assert_eq!(schedule.rate(0), 0.5);
        for k in 0..(opts.max_it - 1) {
            let here = schedule.rate(k);
            let next = schedule.rate(k + 1);
            assert!(next < here, "rate must decay at sweep {k}");
            assert!(next > 0.0, "rate must stay positive at sweep {}", k + 1);
        }
    }

    // Purpose
    // -------
    // Zero decay yields a constant rate.
    //
    // Given
    // -----
    // - decay = 0 with rate0 = 0.3.
    //
    // Expect
    // ------
    // - rate(k) == 0.3 for all k in the run.
    #[test]
    fn zero_decay_is_constant() {
        let opts = SchemeOptions::new(50, 0.3, 0.0, 1e-5).unwrap();
        let schedule = LearningSchedule::new(&opts);
        for k in 0..50 {
            assert_eq!(schedule.rate(k), 0.3);
        }
    }
}

//! Injected diagnostics for fit/transform runs.
//!
//! Verbosity is a capability the caller attaches, not a global flag: the
//! estimator reports structured [`DiagnosticEvent`]s to whatever
//! [`DiagnosticsSink`] it holds, defaulting to [`NoopSink`]. [`StderrSink`]
//! reproduces the classic prints (matrix footprint, convergence,
//! exhaustion, backend fallback) for interactive use.
use std::fmt;

/// Structured diagnostic events emitted during fit and transform.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// Heap size of the freshly built distance matrix.
    MatrixFootprint { bytes: usize },

    /// The error delta dropped below tolerance at this sweep.
    SweepConverged { sweep: usize, delta: f64 },

    /// The sweep cap was reached without convergence.
    SweepsExhausted { sweeps: usize },

    /// The accelerated engine could not start; the run continues on the
    /// sequential engine.
    BackendFallback { reason: String },
}

/// Capability for receiving run diagnostics.
///
/// Implementations must be callable from the model without mutable access
/// (`&self`) and safe to share across threads, since the parallel engine
/// may hold the model's sink alongside its pool.
pub trait DiagnosticsSink: fmt::Debug + Send + Sync {
    fn report(&self, event: &DiagnosticEvent);
}

/// The default sink: discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn report(&self, _event: &DiagnosticEvent) {}
}

/// Prints events to stderr in the classic verbose format.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticsSink for StderrSink {
    fn report(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::MatrixFootprint { bytes } => {
                eprintln!(
                    "Distance matrix size in memory: {:.2} MB",
                    *bytes as f64 / 1024.0 / 1024.0
                );
            }
            DiagnosticEvent::SweepConverged { sweep, delta } => {
                eprintln!("Error below tolerance {delta:e} in iteration {sweep}, breaking");
            }
            DiagnosticEvent::SweepsExhausted { sweeps } => {
                eprintln!("Max iteration reached after {sweeps} sweeps, breaking");
            }
            DiagnosticEvent::BackendFallback { reason } => {
                eprintln!("Unable to start the parallel engine ({reason}); defaulting to the sequential engine");
            }
        }
    }
}

//! Error reporting channel for build steps.
//!
//! Build steps do not return errors to the generator. A failing step reports
//! through a `DiagnosticSink` and returns, and the host decides whether the
//! build as a whole is still usable.

use crate::error::FrameSaverError;

#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink {
    /// Record a failure of the build step named `step`.
    fn report(&mut self, step: &str, error: &FrameSaverError);
}

/// Logs every report through `tracing` and counts them.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    reported: usize,
}

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports received so far.
    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn report(&mut self, step: &str, error: &FrameSaverError) {
        self.reported += 1;
        tracing::error!(step, "Build step failed: {}", error);
    }
}

/// A single collected report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub step: String,
    pub message: String,
}

/// Keeps reports in memory so callers can inspect them after a build.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    entries: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticSink for CollectedDiagnostics {
    fn report(&mut self, step: &str, error: &FrameSaverError) {
        tracing::error!(step, "Build step failed: {}", error);
        self.entries.push(Diagnostic {
            step: step.to_string(),
            message: error.to_string(),
        });
    }
}

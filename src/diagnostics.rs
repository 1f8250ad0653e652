// ABOUTME: Diagnostics accumulator for non-fatal probe failures.
// ABOUTME: A failed probe lowers its signal to "not satisfied" and lands here.

use serde::Serialize;

/// Collects non-fatal warnings during a readiness check.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(signal = warning.signal, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// A probe that could not produce its signal.
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// Readiness signal that fell back to its default.
    pub signal: &'static str,
    pub message: String,
}

impl Warning {
    /// Create a host statistics warning.
    pub fn host_probe(signal: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::HostProbe,
            signal,
            message: message.into(),
        }
    }

    /// Create a container engine warning.
    pub fn engine_probe(signal: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::EngineProbe,
            signal,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Reading host statistics failed.
    HostProbe,
    /// The container engine could not be probed.
    EngineProbe,
}

// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::readiness::Report;
use serde::Serialize;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    /// Human-friendly output
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Print a detail line (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a result: plain text, or `value` as JSON in json mode.
    pub fn result<T: Serialize>(&self, message: &str, value: &T) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => match serde_json::to_string(value) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error: failed to encode output: {e}"),
            },
        }
    }

    /// Print a warning (suppressed in quiet mode).
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "warning",
                    message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print a readiness report.
    pub fn report(&self, report: &Report) {
        let verdict = if report.ready { "ready" } else { "not ready" };
        match self.mode {
            OutputMode::Json => self.result(verdict, report),
            OutputMode::Quiet => println!("{verdict}"),
            OutputMode::Normal => {
                for line in render_report(report) {
                    println!("{line}");
                }
                for warning in &report.warnings {
                    self.warning(&format!("{}: {}", warning.signal, warning.message));
                }
                println!("Host is {verdict}");
            }
        }
    }
}

fn mark(ok: bool) -> &'static str {
    if ok { "✓" } else { "✗" }
}

fn render_report(report: &Report) -> Vec<String> {
    let s = &report.signals;
    let engine = report
        .engine
        .as_ref()
        .map(|info| info.version.clone())
        .unwrap_or_else(|| "not found".to_string());
    let compose = report
        .engine
        .as_ref()
        .and_then(|info| info.compose_version.clone())
        .unwrap_or_else(|| "not found".to_string());
    let group = if s.group_required {
        mark(s.group_satisfied)
    } else {
        "-"
    };

    vec![
        format!("  {} engine          {}", mark(s.engine_installed), engine),
        format!("  {} compose         {}", mark(s.compose_installed), compose),
        format!("  {} engine running", mark(s.engine_running)),
        format!("  {group} engine group"),
        format!("  {} virtualization", mark(s.virtualization)),
        format!("  {} kernel modules", mark(s.kernel_modules)),
        format!("  {} rdp client", mark(s.rdp_client)),
        format!("    memory          {:.2} GB", s.memory_gb),
        format!("    cpu cores       {}", s.cpu_cores),
    ]
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
}

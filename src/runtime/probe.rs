// ABOUTME: Three-state probe outcome and output parsers shared by the probes.
// ABOUTME: Keeps "not installed" apart from "could not tell".

use crate::exec::{CommandOutput, ExecError};
use serde::Serialize;

/// Result of a best-effort capability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Probe<T> {
    /// The capability exists.
    Present(T),
    /// The binary is missing or answered with a non-zero exit.
    Absent,
    /// The probe could not complete (timeout, I/O failure).
    Indeterminate(String),
}

impl<T> Probe<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Probe::Present(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Probe<U> {
        match self {
            Probe::Present(v) => Probe::Present(f(v)),
            Probe::Absent => Probe::Absent,
            Probe::Indeterminate(reason) => Probe::Indeterminate(reason),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Probe::Present(v) => Some(v),
            Probe::Absent | Probe::Indeterminate(_) => None,
        }
    }
}

impl Probe<CommandOutput> {
    /// Classify a command result: a missing binary or non-zero exit is
    /// `Absent`, timeouts and other I/O errors are `Indeterminate`.
    pub fn from_exec(result: Result<CommandOutput, ExecError>) -> Self {
        match result {
            Ok(output) if output.success() => Probe::Present(output),
            Ok(_) | Err(ExecError::NotFound(_)) => Probe::Absent,
            Err(e) => Probe::Indeterminate(e.to_string()),
        }
    }
}

/// First `major.minor.patch` triple appearing in `text`.
pub fn find_semver(text: &str) -> Option<(u64, u64, u64, &str)> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        if let Some((parts, end)) = semver_at(text, start) {
            return Some((parts[0], parts[1], parts[2], &text[start..end]));
        }
        // Skip the rest of this digit run so "12.3" is not retried as "2.3".
        while start < bytes.len() && bytes[start].is_ascii_digit() {
            start += 1;
        }
    }
    None
}

fn semver_at(text: &str, start: usize) -> Option<([u64; 3], usize)> {
    let bytes = text.as_bytes();
    let mut parts = [0u64; 3];
    let mut pos = start;
    for (i, part) in parts.iter_mut().enumerate() {
        if i > 0 {
            if bytes.get(pos) != Some(&b'.') {
                return None;
            }
            pos += 1;
        }
        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == digits_start {
            return None;
        }
        *part = text[digits_start..pos].parse().ok()?;
    }
    Some((parts, pos))
}

/// Parse `compose version` output into an installed flag and version.
///
/// Only v2+ plugins count as installed; the version string is reported
/// whenever a triple matched.
pub fn parse_compose_version(output: &str) -> (bool, Option<String>) {
    match find_semver(output) {
        Some((major, _, _, version)) => (major >= 2, Some(version.to_string())),
        None => (false, None),
    }
}

/// Whether `--version` output from the `docker` binary is really Podman.
pub fn is_podman_shim(version_output: &str) -> bool {
    version_output.to_ascii_lowercase().contains("podman")
}

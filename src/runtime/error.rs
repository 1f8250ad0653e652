// ABOUTME: Runtime error types with SNAFU pattern.
// ABOUTME: Covers dispatched engine commands that could not run or failed.

use snafu::Snafu;

use crate::exec::ExecError;

/// Error from a command dispatched to the container engine.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RuntimeError {
    #[snafu(display("failed to run `{command}`: {source}"))]
    Exec { command: String, source: ExecError },

    #[snafu(display(
        "`{command}` exited with {}: {}",
        describe_exit(*exit_code),
        stderr.trim()
    ))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// The engine binary is not installed.
    EngineMissing,
    /// The command did not finish within the configured timeout.
    Timeout,
    /// Spawning or talking to the child process failed.
    Io,
    /// The engine ran and reported failure.
    CommandFailed,
}

impl RuntimeError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RuntimeErrorKind {
        match self {
            RuntimeError::Exec { source, .. } => match source {
                ExecError::NotFound(_) => RuntimeErrorKind::EngineMissing,
                ExecError::Timeout(_) => RuntimeErrorKind::Timeout,
                ExecError::Io(_) => RuntimeErrorKind::Io,
            },
            RuntimeError::CommandFailed { .. } => RuntimeErrorKind::CommandFailed,
        }
    }

    /// Returns the engine's stderr if the command ran and failed.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            RuntimeError::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

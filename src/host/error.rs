// ABOUTME: Host statistics error types.
// ABOUTME: Covers unreadable /proc files, failed helper commands and bad output.

use crate::exec::ExecError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {reason}")]
    Command { command: String, reason: String },

    #[error("unexpected output: {0}")]
    Parse(String),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

pub type Result<T> = std::result::Result<T, HostError>;

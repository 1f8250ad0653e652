// ABOUTME: External command execution used by every runtime and host probe.
// ABOUTME: Argument-array invocation with a per-command timeout.

mod error;
mod runner;

pub use error::{ExecError, Result};
pub use runner::{
    CommandOutput, CommandRunner, CommandSpec, DEFAULT_COMMAND_TIMEOUT, ProcessRunner,
};

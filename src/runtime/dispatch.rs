// ABOUTME: Pass-through command dispatch to the detected engine.
// ABOUTME: Container, volume and compose operations built on execute().

use super::container_runtime::ContainerRuntime;
use super::command::EngineCommand;
use super::error::{CommandFailedSnafu, ExecSnafu, RuntimeError};
use super::types::EngineKind;
use crate::exec::{CommandOutput, CommandRunner};
use snafu::{ResultExt, ensure};
use std::path::Path;

/// Go template that prints one container name per line.
const NAMES_FORMAT: &str = "{{.Names}}";

/// Lifecycle verbs of `<engine> container <verb> <name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    Pause,
    Unpause,
}

impl ContainerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
            ContainerAction::Pause => "pause",
            ContainerAction::Unpause => "unpause",
        }
    }
}

impl<R: CommandRunner> ContainerRuntime<R> {
    /// Run `command` against the detected engine and return its output.
    ///
    /// Falls back to `docker` when no engine was detected so callers get
    /// the engine's own "not found" error. A non-zero exit is an error.
    pub async fn execute(&self, command: &EngineCommand) -> Result<CommandOutput, RuntimeError> {
        let kind = self.detect().await.unwrap_or(EngineKind::Docker);
        let spec = command.rewrite(kind);
        let rendered = spec.to_string();

        let output = self
            .runner
            .run(&spec)
            .await
            .context(ExecSnafu { command: &rendered })?;

        ensure!(
            output.success(),
            CommandFailedSnafu {
                command: rendered,
                exit_code: output.exit_code,
                stderr: output.stderr,
            }
        );
        Ok(output)
    }

    async fn execute_trimmed(&self, command: EngineCommand) -> Result<String, RuntimeError> {
        let output = self.execute(&command).await?;
        Ok(output.stdout.trim().to_string())
    }

    /// `inspect --format <format> <name>`, trimmed.
    pub async fn inspect(&self, name: &str, format: &str) -> Result<String, RuntimeError> {
        self.execute_trimmed(EngineCommand::engine(["inspect", "--format", format, name]))
            .await
    }

    pub async fn container_action(
        &self,
        action: ContainerAction,
        name: &str,
    ) -> Result<String, RuntimeError> {
        tracing::debug!(container = name, action = action.as_str(), "container action");
        self.execute_trimmed(EngineCommand::engine(["container", action.as_str(), name]))
            .await
    }

    pub async fn start(&self, name: &str) -> Result<String, RuntimeError> {
        self.container_action(ContainerAction::Start, name).await
    }

    pub async fn stop(&self, name: &str) -> Result<String, RuntimeError> {
        self.container_action(ContainerAction::Stop, name).await
    }

    pub async fn pause(&self, name: &str) -> Result<String, RuntimeError> {
        self.container_action(ContainerAction::Pause, name).await
    }

    pub async fn unpause(&self, name: &str) -> Result<String, RuntimeError> {
        self.container_action(ContainerAction::Unpause, name).await
    }

    /// Remove a container.
    pub async fn remove(&self, name: &str) -> Result<String, RuntimeError> {
        self.execute_trimmed(EngineCommand::engine(["rm", name])).await
    }

    pub async fn remove_volume(&self, name: &str) -> Result<String, RuntimeError> {
        self.execute_trimmed(EngineCommand::engine(["volume", "rm", name]))
            .await
    }

    /// Names of all containers, running or not, optionally filtered
    /// (`name=web`, `status=exited`, ...).
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<String>, RuntimeError> {
        let mut args = vec!["ps", "-a"];
        if let Some(filter) = filter {
            args.extend(["--filter", filter]);
        }
        args.extend(["--format", NAMES_FORMAT]);

        let output = self.execute(&EngineCommand::engine(args)).await?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// `compose -f <file> up -d`. Compose reports progress on stderr, so the
    /// raw output is returned.
    pub async fn compose_up(&self, file: &Path) -> Result<CommandOutput, RuntimeError> {
        self.compose(file, &["up", "-d"]).await
    }

    pub async fn compose_down(&self, file: &Path) -> Result<CommandOutput, RuntimeError> {
        self.compose(file, &["down"]).await
    }

    async fn compose(&self, file: &Path, tail: &[&str]) -> Result<CommandOutput, RuntimeError> {
        let file = file.to_string_lossy();
        let mut args = vec!["compose", "-f", &*file];
        args.extend_from_slice(tail);
        self.execute(&EngineCommand::engine(args)).await
    }
}

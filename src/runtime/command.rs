// ABOUTME: Engine command descriptors and binary-name rewriting.
// ABOUTME: Only the leading program token is rewritten, never the arguments.

use super::types::EngineKind;
use crate::exec::CommandSpec;

const ENGINE_NAMES: [&str; 2] = ["docker", "podman"];

/// A command addressed to "the container engine", written against either
/// engine's CLI name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    program: String,
    args: Vec<String>,
}

impl EngineCommand {
    /// Command for the engine binary itself (`docker <args>`).
    pub fn engine<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(EngineKind::Docker.binary(), args)
    }

    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whitespace-separated template such as `docker ps -a`.
    ///
    /// No shell quoting is interpreted; callers with arguments that contain
    /// spaces should build the command with [`EngineCommand::new`].
    pub fn from_template(template: &str) -> Option<Self> {
        let mut tokens = template.split_whitespace();
        let program = tokens.next()?;
        Some(Self::new(program, tokens))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Rewrite a leading `docker`/`podman` prefix of the program to the
    /// given engine's binary. `docker-compose` becomes `podman-compose`.
    pub fn rewrite(&self, kind: EngineKind) -> CommandSpec {
        let program = ENGINE_NAMES
            .iter()
            .find_map(|name| self.program.strip_prefix(name))
            .map(|rest| format!("{}{rest}", kind.binary()))
            .unwrap_or_else(|| self.program.clone());

        CommandSpec {
            program,
            args: self.args.clone(),
        }
    }
}

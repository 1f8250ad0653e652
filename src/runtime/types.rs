// ABOUTME: Engine type definitions for Docker and Podman.
// ABOUTME: Includes EngineKind, RuntimeInfo and the Podman network backends.

use serde::{Deserialize, Serialize};

/// The container engine type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Docker,
    Podman,
}

impl EngineKind {
    /// Name of the engine's CLI binary.
    pub fn binary(&self) -> &'static str {
        match self {
            EngineKind::Docker => "docker",
            EngineKind::Podman => "podman",
        }
    }

    /// Whether the invoking user must belong to the engine's group.
    ///
    /// Docker's daemon socket is group-owned; rootless Podman has no daemon.
    pub fn requires_group(&self) -> bool {
        matches!(self, EngineKind::Docker)
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binary())
    }
}

/// Probed engine capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    /// The engine this info was probed from.
    pub kind: EngineKind,
    /// Trimmed `--version` output, as reported by the engine.
    pub version: String,
    /// A compose v2+ plugin answered `compose version`.
    pub compose_installed: bool,
    /// `major.minor.patch` reported by the compose plugin, when one matched.
    pub compose_version: Option<String>,
}

/// User-space network backend for rootless Podman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    Pasta,
    Slirp4netns,
}

impl NetworkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkMode::Pasta => "pasta",
            NetworkMode::Slirp4netns => "slirp4netns",
        }
    }
}

impl std::fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ABOUTME: Capability probes for the detected engine.
// ABOUTME: Version, compose plugin, liveness, group access and network mode.

use super::container_runtime::ContainerRuntime;
use super::probe::{Probe, parse_compose_version};
use super::types::{EngineKind, NetworkMode, RuntimeInfo};
use crate::exec::{CommandRunner, CommandSpec};

/// Podman releases whose rootless networking defaults to pasta.
const PASTA_VERSION_MARKER: &str = "4.4";

impl<R: CommandRunner> ContainerRuntime<R> {
    /// Version and compose support of the detected engine.
    ///
    /// Served from cache while the detected kind is unchanged.
    pub async fn info(&self) -> Option<RuntimeInfo> {
        let kind = self.detect().await?;
        if let Some(info) = self.cache.info_for(kind) {
            return Some(info);
        }

        let generation = self.cache.generation();
        let version = match self.version_probe(kind).await {
            Probe::Present(output) => output.stdout.trim().to_string(),
            outcome => {
                tracing::warn!(engine = %kind, ?outcome, "engine version probe failed");
                return None;
            }
        };

        let (compose_installed, compose_version) = self.compose_probe(kind).await;
        let info = RuntimeInfo {
            kind,
            version,
            compose_installed,
            compose_version,
        };
        self.cache.store_info(generation, info.clone());
        Some(info)
    }

    async fn compose_probe(&self, kind: EngineKind) -> (bool, Option<String>) {
        let spec = CommandSpec::new(kind.binary(), ["compose", "version"]);
        match Probe::from_exec(self.run(spec).await) {
            Probe::Present(output) => parse_compose_version(&output.stdout),
            outcome => {
                tracing::debug!(engine = %kind, ?outcome, "compose plugin not available");
                (false, None)
            }
        }
    }

    /// Whether the engine answers `ps` with a listing.
    pub async fn is_running(&self) -> bool {
        let Some(kind) = self.detect().await else {
            return false;
        };
        let spec = CommandSpec::new(kind.binary(), ["ps"]);
        match Probe::from_exec(self.run(spec).await) {
            Probe::Present(output) => !output.stdout.trim().is_empty(),
            outcome => {
                tracing::debug!(engine = %kind, ?outcome, "engine is not running");
                false
            }
        }
    }

    /// Whether the invoking user satisfies the engine's access model.
    ///
    /// Podman needs no group. Docker needs membership in the configured
    /// group, read from `id -Gn`.
    pub async fn has_group_access(&self) -> bool {
        match self.detect().await {
            Some(EngineKind::Podman) => true,
            Some(EngineKind::Docker) => self.in_engine_group().await,
            None => false,
        }
    }

    async fn in_engine_group(&self) -> bool {
        let spec = CommandSpec::new("id", ["-Gn"]);
        match Probe::from_exec(self.run(spec).await) {
            Probe::Present(output) => output
                .stdout
                .split_whitespace()
                .any(|group| group == self.settings.engine_group),
            outcome => {
                tracing::warn!(?outcome, "could not read group memberships");
                false
            }
        }
    }

    /// Whether group membership is required at all for the detected engine.
    pub async fn requires_group(&self) -> bool {
        self.detect()
            .await
            .is_some_and(|kind| kind.requires_group())
    }

    /// Network backend override for the detected engine.
    ///
    /// `None` means the engine default (Docker). Podman always gets a
    /// user-space backend; a failed version probe falls back to slirp4netns.
    pub async fn network_mode(&self) -> Option<NetworkMode> {
        match self.detect().await? {
            EngineKind::Docker => None,
            EngineKind::Podman => {
                let mode = match self.info().await {
                    Some(info) => select_network_mode(&info.version),
                    None => NetworkMode::Slirp4netns,
                };
                Some(mode)
            }
        }
    }
}

/// Pick the rootless Podman network backend from its version string.
pub fn select_network_mode(version: &str) -> NetworkMode {
    if version.contains(PASTA_VERSION_MARKER) {
        NetworkMode::Pasta
    } else {
        NetworkMode::Slirp4netns
    }
}

// ABOUTME: Engine detection for the local system.
// ABOUTME: Tries the docker binary first and unmasks Podman's docker shim.

use super::container_runtime::ContainerRuntime;
use super::probe::{Probe, is_podman_shim};
use super::types::EngineKind;
use crate::exec::{CommandOutput, CommandRunner, CommandSpec};

impl<R: CommandRunner> ContainerRuntime<R> {
    /// Detect the installed engine, or `None` when neither answers.
    ///
    /// The first successful detection is cached until [`reset`](Self::reset).
    pub async fn detect(&self) -> Option<EngineKind> {
        self.detect_outcome().await.into_option()
    }

    /// Like [`detect`](Self::detect), but keeps a failed probe apart from a
    /// missing engine.
    ///
    /// Detection order:
    /// 1. `docker --version`; output mentioning Podman means the shim
    /// 2. `podman --version`
    pub async fn detect_outcome(&self) -> Probe<EngineKind> {
        if let Some(kind) = self.cache.kind() {
            return Probe::Present(kind);
        }

        let generation = self.cache.generation();
        match self.probe_engines().await {
            Probe::Present(kind) => {
                let kind = self.cache.store_kind(generation, kind);
                tracing::debug!(engine = %kind, "detected container engine");
                Probe::Present(kind)
            }
            outcome => {
                tracing::debug!(?outcome, "no container engine detected");
                outcome
            }
        }
    }

    async fn probe_engines(&self) -> Probe<EngineKind> {
        let docker = self.version_probe(EngineKind::Docker).await;
        if let Probe::Present(ref output) = docker {
            let kind = if is_podman_shim(&output.stdout) || is_podman_shim(&output.stderr) {
                EngineKind::Podman
            } else {
                EngineKind::Docker
            };
            return Probe::Present(kind);
        }

        match self.version_probe(EngineKind::Podman).await {
            Probe::Present(_) => Probe::Present(EngineKind::Podman),
            Probe::Indeterminate(reason) => Probe::Indeterminate(reason),
            Probe::Absent => match docker {
                Probe::Indeterminate(reason) => Probe::Indeterminate(reason),
                _ => Probe::Absent,
            },
        }
    }

    pub(super) async fn version_probe(&self, kind: EngineKind) -> Probe<CommandOutput> {
        let spec = CommandSpec::new(kind.binary(), ["--version"]);
        Probe::from_exec(self.run(spec).await)
    }
}

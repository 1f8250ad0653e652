// ABOUTME: ContainerRuntime owns the command runner and the capability cache.
// ABOUTME: Detection, probing and dispatch are implemented in sibling modules.

use super::cache::CapabilityCache;
use crate::exec::{CommandOutput, CommandRunner, CommandSpec, ExecError};

/// Group whose members may talk to the Docker daemon socket.
pub const DEFAULT_ENGINE_GROUP: &str = "docker";

/// Settings that shape the capability probes.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    /// Group the invoking user must belong to for rootful engines.
    pub engine_group: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            engine_group: DEFAULT_ENGINE_GROUP.to_string(),
        }
    }
}

/// Handle to whichever container engine is installed on this host.
///
/// Create one per process (or per test) and share it by reference; the
/// detection result is memoized until [`ContainerRuntime::reset`].
#[derive(Debug)]
pub struct ContainerRuntime<R> {
    pub(super) runner: R,
    pub(super) cache: CapabilityCache,
    pub(super) settings: RuntimeSettings,
}

impl<R: CommandRunner> ContainerRuntime<R> {
    pub fn new(runner: R) -> Self {
        Self::with_settings(runner, RuntimeSettings::default())
    }

    pub fn with_settings(runner: R, settings: RuntimeSettings) -> Self {
        Self {
            runner,
            cache: CapabilityCache::new(),
            settings,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    /// Forget the detected engine and its probed info.
    pub fn reset(&self) {
        tracing::debug!("resetting container runtime cache");
        self.cache.reset();
    }

    pub(super) async fn run(&self, spec: CommandSpec) -> Result<CommandOutput, ExecError> {
        let result = self.runner.run(&spec).await;
        if let Err(ref e) = result {
            tracing::debug!(command = %spec, error = %e, "command did not run");
        }
        result
    }
}

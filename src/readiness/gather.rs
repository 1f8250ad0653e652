// ABOUTME: Collects readiness signals from the engine, the host and PATH.
// ABOUTME: Each probe is fault-isolated; failures become warnings, not errors.

use super::signals::{ReadinessSignals, Requirements, is_ready};
use crate::diagnostics::{Diagnostics, Warning};
use crate::exec::CommandRunner;
use crate::host::{HostStats, RdpClientLocator};
use crate::runtime::{ContainerRuntime, NetworkMode, Probe, RuntimeInfo};
use serde::Serialize;

/// Outcome of a readiness check.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub ready: bool,
    pub signals: ReadinessSignals,
    pub engine: Option<RuntimeInfo>,
    pub network_mode: Option<NetworkMode>,
    pub warnings: Vec<Warning>,
}

/// Probe every readiness signal and evaluate the predicate.
///
/// Never fails: a probe that errors leaves its signal at the unsatisfied
/// default and records a warning.
pub async fn gather<R, H, L>(
    runtime: &ContainerRuntime<R>,
    host: &H,
    locator: &L,
    kernel_modules: &[String],
    requirements: &Requirements,
) -> Report
where
    R: CommandRunner,
    H: HostStats + ?Sized,
    L: RdpClientLocator + ?Sized,
{
    let mut diag = Diagnostics::default();
    let mut signals = ReadinessSignals::default();

    match runtime.detect_outcome().await {
        Probe::Present(_) => signals.engine_installed = true,
        Probe::Absent => {}
        Probe::Indeterminate(reason) => diag.warn(Warning::engine_probe(
            "engine_installed",
            format!("engine detection did not complete: {reason}"),
        )),
    }

    let mut engine = None;
    let mut network_mode = None;
    if signals.engine_installed {
        engine = runtime.info().await;
        match &engine {
            Some(info) => signals.compose_installed = info.compose_installed,
            None => diag.warn(Warning::engine_probe(
                "compose_installed",
                "engine version could not be read",
            )),
        }
        signals.engine_running = runtime.is_running().await;
        signals.group_required = runtime.requires_group().await;
        signals.group_satisfied = runtime.has_group_access().await;
        network_mode = runtime.network_mode().await;
    }

    match host.cpu_cores().await {
        Ok(cores) => signals.cpu_cores = cores,
        Err(e) => diag.warn(Warning::host_probe("cpu_cores", e.to_string())),
    }

    match host.memory().await {
        Ok(memory) => signals.memory_gb = memory.total_gb,
        Err(e) => diag.warn(Warning::host_probe("memory_gb", e.to_string())),
    }

    match host.virtualization().await {
        Ok(supported) => signals.virtualization = supported,
        Err(e) => diag.warn(Warning::host_probe("virtualization", e.to_string())),
    }

    let mut modules_loaded = true;
    for module in kernel_modules {
        match host.module_loaded(module).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(module = %module, "kernel module not loaded");
                modules_loaded = false;
            }
            Err(e) => {
                diag.warn(Warning::host_probe(
                    "kernel_modules",
                    format!("{module}: {e}"),
                ));
                modules_loaded = false;
            }
        }
    }
    signals.kernel_modules = modules_loaded;

    signals.rdp_client = locator.locate().is_some();

    let ready = is_ready(&signals, requirements);
    tracing::debug!(ready, ?signals, "readiness evaluated");

    Report {
        ready,
        signals,
        engine,
        network_mode,
        warnings: diag.into_warnings(),
    }
}

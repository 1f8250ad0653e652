// ABOUTME: Readiness signal set, thresholds and the readiness predicate.
// ABOUTME: Pure data; no probing happens here.

use serde::{Deserialize, Serialize};

/// One snapshot of every host fact the readiness check looks at.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadinessSignals {
    pub engine_installed: bool,
    pub compose_installed: bool,
    pub engine_running: bool,
    pub group_required: bool,
    pub group_satisfied: bool,
    pub virtualization: bool,
    /// Every configured kernel module is loaded.
    pub kernel_modules: bool,
    pub rdp_client: bool,
    pub memory_gb: f64,
    pub cpu_cores: u32,
}

/// Minimum resources the host must offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default = "default_min_memory_gb")]
    pub min_memory_gb: f64,
    #[serde(default = "default_min_cpu_cores")]
    pub min_cpu_cores: u32,
}

fn default_min_memory_gb() -> f64 {
    4.0
}

fn default_min_cpu_cores() -> u32 {
    2
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            min_memory_gb: default_min_memory_gb(),
            min_cpu_cores: default_min_cpu_cores(),
        }
    }
}

/// Whether the host satisfies every prerequisite.
pub fn is_ready(signals: &ReadinessSignals, requirements: &Requirements) -> bool {
    signals.engine_installed
        && signals.compose_installed
        && signals.engine_running
        && (!signals.group_required || signals.group_satisfied)
        && signals.virtualization
        && signals.kernel_modules
        && signals.rdp_client
        && signals.memory_gb >= requirements.min_memory_gb
        && signals.cpu_cores >= requirements.min_cpu_cores
}

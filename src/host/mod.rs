// ABOUTME: Host statistics and remote-desktop client discovery.
// ABOUTME: Linux implementation backed by /proc, /dev, lscpu and lsmod.

mod error;
mod linux;
mod rdp;

pub use error::{HostError, Result};
pub use linux::{LinuxHost, MemoryInfo, count_physical_cores, parse_meminfo};
pub use rdp::{DEFAULT_RDP_CLIENTS, PathLocator, RdpClientLocator};

use async_trait::async_trait;

/// Host facts consumed by the readiness check.
#[async_trait]
pub trait HostStats: Send + Sync {
    /// Physical CPU cores across all sockets.
    async fn cpu_cores(&self) -> Result<u32>;

    /// Total and available memory in gigabytes.
    async fn memory(&self) -> Result<MemoryInfo>;

    /// Hardware virtualization extensions present and `/dev/kvm` available.
    async fn virtualization(&self) -> Result<bool>;

    /// Whether the named kernel module is loaded.
    async fn module_loaded(&self, name: &str) -> Result<bool>;
}

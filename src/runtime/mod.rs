// ABOUTME: Container engine detection, capability probing and dispatch.
// ABOUTME: One ContainerRuntime per process fronts whichever engine is installed.

mod cache;
mod capabilities;
mod command;
mod container_runtime;
mod detection;
mod dispatch;
mod error;
mod probe;
mod types;

pub use cache::{CapabilityCache, Generation};
pub use capabilities::select_network_mode;
pub use command::EngineCommand;
pub use container_runtime::{ContainerRuntime, DEFAULT_ENGINE_GROUP, RuntimeSettings};
pub use dispatch::ContainerAction;
pub use error::{RuntimeError, RuntimeErrorKind};
pub use probe::{Probe, find_semver, is_podman_shim, parse_compose_version};
pub use types::{EngineKind, NetworkMode, RuntimeInfo};

// ABOUTME: Configuration types and parsing for hostready.yml.
// ABOUTME: Every field is optional; an absent file means built-in defaults.

use crate::error::{Error, Result};
use crate::exec::DEFAULT_COMMAND_TIMEOUT;
use crate::host::DEFAULT_RDP_CLIENTS;
use crate::readiness::Requirements;
use crate::runtime::{DEFAULT_ENGINE_GROUP, RuntimeSettings};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "hostready.yml";
pub const CONFIG_FILENAME_ALT: &str = "hostready.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".hostready/config.yml";

/// Kernel modules the guest's port forwarding relies on.
pub const DEFAULT_KERNEL_MODULES: &[&str] = &["ip_tables", "iptable_nat"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Upper bound for every external command.
    #[serde(default = "default_command_timeout", with = "humantime_serde")]
    pub command_timeout: Duration,

    #[serde(default = "default_engine_group")]
    pub engine_group: String,

    #[serde(default)]
    pub requirements: Requirements,

    #[serde(default = "default_kernel_modules")]
    pub kernel_modules: Vec<String>,

    #[serde(default = "default_rdp_clients")]
    pub rdp_clients: Vec<String>,
}

fn default_command_timeout() -> Duration {
    DEFAULT_COMMAND_TIMEOUT
}

fn default_engine_group() -> String {
    DEFAULT_ENGINE_GROUP.to_string()
}

fn default_kernel_modules() -> Vec<String> {
    DEFAULT_KERNEL_MODULES.iter().map(|m| m.to_string()).collect()
}

fn default_rdp_clients() -> Vec<String> {
    DEFAULT_RDP_CLIENTS.iter().map(|c| c.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_timeout: default_command_timeout(),
            engine_group: default_engine_group(),
            requirements: Requirements::default(),
            kernel_modules: default_kernel_modules(),
            rdp_clients: default_rdp_clients(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or the defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading configuration");
                return Self::load(path);
            }
        }

        tracing::debug!(dir = %dir.display(), "no configuration file, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.command_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "command_timeout must be greater than zero".to_string(),
            ));
        }
        if self.engine_group.trim().is_empty() {
            return Err(Error::InvalidConfig("engine_group cannot be empty".to_string()));
        }
        if let Some(module) = self.kernel_modules.iter().find(|m| m.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "invalid kernel module name: {module:?}"
            )));
        }
        if self.requirements.min_memory_gb < 0.0 {
            return Err(Error::InvalidConfig(
                "requirements.min_memory_gb cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Convert to RuntimeSettings for use with ContainerRuntime.
    pub fn runtime_settings(&self) -> RuntimeSettings {
        RuntimeSettings {
            engine_group: self.engine_group.clone(),
        }
    }
}

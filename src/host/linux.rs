// ABOUTME: Linux HostStats implementation.
// ABOUTME: Reads meminfo/cpuinfo under a configurable root and shells out to lscpu/lsmod.

use super::HostStats;
use super::error::{HostError, Result};
use crate::exec::{CommandRunner, CommandSpec};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const KIB_PER_GIB: f64 = 1024.0 * 1024.0;

/// Memory totals in gigabytes, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryInfo {
    pub total_gb: f64,
    pub available_gb: f64,
}

/// Host statistics for Linux.
#[derive(Debug, Clone)]
pub struct LinuxHost<R> {
    runner: R,
    proc_root: PathBuf,
    dev_root: PathBuf,
}

impl<R: CommandRunner> LinuxHost<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            proc_root: PathBuf::from("/proc"),
            dev_root: PathBuf::from("/dev"),
        }
    }

    /// Read `meminfo`/`cpuinfo` from `root` instead of `/proc`.
    pub fn proc_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.proc_root = root.into();
        self
    }

    /// Look for `kvm` under `root` instead of `/dev`.
    pub fn dev_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.dev_root = root.into();
        self
    }

    async fn stdout_of(&self, spec: CommandSpec) -> Result<String> {
        let output = self.runner.run(&spec).await?;
        if !output.success() {
            return Err(HostError::Command {
                command: spec.to_string(),
                reason: output.stderr.trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| HostError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl<R: CommandRunner> HostStats for LinuxHost<R> {
    async fn cpu_cores(&self) -> Result<u32> {
        let stdout = self
            .stdout_of(CommandSpec::new("lscpu", ["-p=core,socket"]))
            .await?;
        match count_physical_cores(&stdout) {
            0 => Err(HostError::Parse("lscpu reported no cores".to_string())),
            cores => Ok(cores),
        }
    }

    async fn memory(&self) -> Result<MemoryInfo> {
        let content = read(&self.proc_root.join("meminfo"))?;
        parse_meminfo(&content)
    }

    async fn virtualization(&self) -> Result<bool> {
        let cpuinfo = read(&self.proc_root.join("cpuinfo"))?;
        let has_extension = cpuinfo
            .lines()
            .filter(|line| line.starts_with("flags"))
            .flat_map(str::split_whitespace)
            .any(|flag| flag == "vmx" || flag == "svm");
        let has_device = self.dev_root.join("kvm").exists();

        tracing::debug!(has_extension, has_device, "virtualization support");
        Ok(has_extension && has_device)
    }

    async fn module_loaded(&self, name: &str) -> Result<bool> {
        let stdout = self.stdout_of(CommandSpec::new("lsmod", Vec::<String>::new())).await?;
        Ok(stdout
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next())
            .any(|module| module == name))
    }
}

/// Count distinct `core,socket` pairs in `lscpu -p=core,socket` output.
pub fn count_physical_cores(lscpu: &str) -> u32 {
    let cores: HashSet<&str> = lscpu
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    cores.len() as u32
}

/// Parse `MemTotal` and `MemAvailable` from `/proc/meminfo` content.
pub fn parse_meminfo(content: &str) -> Result<MemoryInfo> {
    let field = |name: &str| -> Result<f64> {
        content
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|kib| kib.parse::<u64>().ok())
            .map(|kib| round2(kib as f64 / KIB_PER_GIB))
            .ok_or_else(|| HostError::Parse(format!("meminfo has no {name}")))
    };

    Ok(MemoryInfo {
        total_gb: field("MemTotal")?,
        available_gb: field("MemAvailable")?,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "\
MemTotal:       16314164 kB
MemFree:         1021340 kB
MemAvailable:    8157082 kB
Buffers:          412344 kB
";

    #[test]
    fn meminfo_is_converted_to_rounded_gigabytes() {
        let info = parse_meminfo(MEMINFO).unwrap();
        assert_eq!(info.total_gb, 15.56);
        assert_eq!(info.available_gb, 7.78);
    }

    #[test]
    fn meminfo_without_available_is_an_error() {
        let err = parse_meminfo("MemTotal: 1024 kB\n").unwrap_err();
        assert!(matches!(err, HostError::Parse(ref msg) if msg.contains("MemAvailable")));
    }

    #[test]
    fn hyperthreads_are_not_counted_twice() {
        let lscpu = "\
# The following is the parsable format, which can be fed to other
# programs. Each different item in every column has an unique ID
# starting usually from zero.
# Core,Socket
0,0
1,0
0,0
1,0
";
        assert_eq!(count_physical_cores(lscpu), 2);
    }

    #[test]
    fn cores_on_separate_sockets_are_distinct() {
        assert_eq!(count_physical_cores("0,0\n0,1\n"), 2);
    }
}

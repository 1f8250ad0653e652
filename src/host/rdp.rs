// ABOUTME: Remote-desktop client discovery on PATH.
// ABOUTME: Returns the first configured FreeRDP binary that resolves.

use std::path::PathBuf;

/// FreeRDP front-ends able to connect to the guest, in preference order.
pub const DEFAULT_RDP_CLIENTS: &[&str] = &["xfreerdp3", "xfreerdp", "sdl-freerdp3", "sdl-freerdp"];

/// Finds a usable remote-desktop client.
pub trait RdpClientLocator: Send + Sync {
    fn locate(&self) -> Option<PathBuf>;
}

/// Searches `PATH` for candidate binaries.
#[derive(Debug, Clone)]
pub struct PathLocator {
    candidates: Vec<String>,
}

impl PathLocator {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for PathLocator {
    fn default() -> Self {
        Self::new(DEFAULT_RDP_CLIENTS.iter().copied())
    }
}

impl RdpClientLocator for PathLocator {
    fn locate(&self) -> Option<PathBuf> {
        let found = self
            .candidates
            .iter()
            .find_map(|name| which::which(name).ok());
        match &found {
            Some(path) => tracing::debug!(client = %path.display(), "found RDP client"),
            None => tracing::debug!(candidates = ?self.candidates, "no RDP client on PATH"),
        }
        found
    }
}

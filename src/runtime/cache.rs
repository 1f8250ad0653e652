// ABOUTME: Memoized detection and runtime-info results.
// ABOUTME: Kind and info are stored together so they can never disagree.

use super::types::{EngineKind, RuntimeInfo};
use parking_lot::Mutex;

/// Token taken before a probe starts; writes from a stale token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Default)]
struct CacheState {
    kind: Option<EngineKind>,
    info: Option<RuntimeInfo>,
    generation: u64,
}

/// Process-lifetime cache owned by a `ContainerRuntime`.
///
/// The lock is only held for reads and writes, never across a command.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    state: Mutex<CacheState>,
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> Generation {
        Generation(self.state.lock().generation)
    }

    pub fn kind(&self) -> Option<EngineKind> {
        self.state.lock().kind
    }

    /// Cached info, only if it was probed from the cached kind.
    pub fn info_for(&self, kind: EngineKind) -> Option<RuntimeInfo> {
        let state = self.state.lock();
        match (&state.kind, &state.info) {
            (Some(cached), Some(info)) if *cached == kind && info.kind == kind => {
                Some(info.clone())
            }
            _ => None,
        }
    }

    /// Store a detection result. Returns the kind now cached, which is the
    /// earlier result if another caller won the race.
    pub fn store_kind(&self, generation: Generation, kind: EngineKind) -> EngineKind {
        let mut state = self.state.lock();
        if state.generation != generation.0 {
            return kind;
        }
        match state.kind {
            Some(existing) => existing,
            None => {
                state.kind = Some(kind);
                kind
            }
        }
    }

    /// Store a freshly probed info. Dropped when the cache was reset after
    /// `generation` was taken or when the cached kind has moved on.
    pub fn store_info(&self, generation: Generation, info: RuntimeInfo) {
        let mut state = self.state.lock();
        if state.generation != generation.0 {
            return;
        }
        match state.kind {
            Some(kind) if kind != info.kind => {}
            _ => {
                state.kind = Some(info.kind);
                state.info = Some(info);
            }
        }
    }

    /// Forget the detected kind and info together.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.kind = None;
        state.info = None;
        state.generation = state.generation.wrapping_add(1);
    }
}

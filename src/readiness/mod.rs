// ABOUTME: Host readiness signals and the aggregate prerequisite check.
// ABOUTME: Gathers every signal independently and evaluates a pure predicate.

mod gather;
mod signals;

pub use gather::{Report, gather};
pub use signals::{ReadinessSignals, Requirements, is_ready};

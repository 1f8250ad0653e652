// ABOUTME: Library root for hostready - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod host;
pub mod output;
pub mod readiness;
pub mod runtime;

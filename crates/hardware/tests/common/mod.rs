//! Shared test infrastructure.

/// Latch-entry and program builders.
pub mod builder;

/// Simulator harness with per-cycle history recording.
pub mod harness;

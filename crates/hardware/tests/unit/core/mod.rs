//! Unit tests for the CPU core: pipeline stages and hazard handling.

/// Pipeline stage and hazard tests.
pub mod pipeline;

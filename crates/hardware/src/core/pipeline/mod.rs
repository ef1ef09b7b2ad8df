//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Hazards:** Operand readiness checks and the branch-wait counter.
//! 2. **Latches:** Per-stage buffers, double-buffered across ticks.
//! 3. **Scoreboard:** Register validity with early result forwarding.
//! 4. **Signals:** Per-tick flush, redirect and hold requests.
//! 5. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 6. **Traits:** Common interface for pipeline latches.

/// Pipeline hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches.
pub mod latches;

/// Register validity tracking.
pub mod scoreboard;

/// Per-tick control signals and ALU operation types.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;

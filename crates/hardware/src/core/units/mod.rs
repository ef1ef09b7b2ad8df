//! Execution units and functional components.
//!
//! This module contains the functional units used by the Execute stage:
//! the integer ALU (which owns the zero flag) and the multi-cycle multiplier.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Multi-cycle multiply state machine.
pub mod multiplier;

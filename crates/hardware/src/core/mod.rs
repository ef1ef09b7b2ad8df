//! Core processor implementation.
//!
//! This module contains the CPU state container, the five-stage instruction
//! pipeline and the execution units it drives.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, multiplier).
pub mod units;

pub use self::cpu::Cpu;

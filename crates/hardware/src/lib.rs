//! APEX pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator of the in-order, five-stage
//! APEX processor with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), register
//!    scoreboard, ALU with zero flag and a two-cycle multiplier.
//! 2. **ISA:** The closed APEX opcode set, its text form and disassembly.
//! 3. **Simulation:** Program loader, run control, configuration and statistics.
//!
//! # Examples
//!
//! ```
//! use apex_core::sim::{parse_program, RunMode, Simulator, Termination};
//! use apex_core::Config;
//!
//! let program = parse_program("MOVC,R1,#5\nHALT\n").unwrap();
//! let mut sim = Simulator::new(program, &Config::default()).unwrap();
//! assert_eq!(sim.run(RunMode::Silent, 100).unwrap(), Termination::CompletedNormally);
//! assert_eq!(sim.registers().get(1), Some((5, true)));
//! ```

/// Common types and constants (addresses, registers, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, execution units, data memory).
pub mod core;
/// Instruction set (opcodes, instructions, disassembly).
pub mod isa;
/// Program loader and run control.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Crate error type and result alias.
pub use crate::common::{SimError, SimResult};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds pipeline, registers, data memory and stats.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;

//! Common utilities and types used throughout the APEX pipeline simulator.
//!
//! This module provides the building blocks shared by every pipeline stage:
//! 1. **Constants:** Program base address, instruction width, register count.
//! 2. **Error Handling:** The crate-wide `SimError` type and `SimResult` alias.
//! 3. **Register Management:** The architectural register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for initialization, decoding and operand access.
pub mod error;

/// Architectural register file.
pub mod reg;

pub use constants::{CODE_BASE_ADDRESS, INSTRUCTION_SIZE, NUM_REGISTERS};
pub use error::{SimError, SimResult};
pub use reg::{RegisterFile, Word};

//! APEX instruction set.
//!
//! This module defines the decoded instruction representation consumed by the
//! pipeline. It includes:
//! 1. **Opcodes:** The closed set of APEX operations and their classification.
//! 2. **Instructions:** The immutable `{opcode, rd, rs1, rs2, imm}` record.
//! 3. **Disassembly:** Canonical text rendering used by traces and the loader.

/// Canonical text rendering of instructions.
pub mod disasm;

/// Opcode enumeration and instruction record.
pub mod instruction;

pub use instruction::{Instruction, Opcode};

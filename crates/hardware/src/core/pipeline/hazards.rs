//! Data and Control Hazard Detection.
//!
//! This module implements the checks Decode performs before issuing an
//! instruction into Execute. It provides:
//! 1. **Operand Validation:** Rejects register indices outside the register file.
//! 2. **RAW/WAW Detection:** Consults the scoreboard for every source operand
//!    and for the destination register.
//! 3. **Branch Wait:** Holds a conditional branch behind an arithmetic
//!    instruction so it never observes a stale zero flag.

use crate::common::constants::NUM_REGISTERS;
use crate::common::error::{SimError, SimResult};
use crate::core::pipeline::latches::Latch;
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::isa::Instruction;

/// Reason an instruction cannot leave Decode this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// A source register is still owed a value (read-after-write).
    ReadAfterWrite(usize),
    /// The destination register already has a writer in flight (write-after-write).
    WriteAfterWrite(usize),
}

/// Rejects any register index the instruction uses that is outside `R0..R31`.
///
/// # Errors
///
/// Returns [`SimError::OperandOutOfRange`] naming the first bad index.
pub fn validate_registers(inst: &Instruction) -> SimResult<()> {
    match inst.used_registers().find(|&r| r >= NUM_REGISTERS) {
        Some(bad) => Err(SimError::register(bad)),
        None => Ok(()),
    }
}

/// Checks whether `inst` may issue given the current scoreboard.
///
/// Register-register ALU ops and `STORE` need both sources; `LOAD` and
/// `JUMP` need `rs1`; `MOVC`, `HALT`, `NOP` and the conditional branches read
/// nothing. A register-writing instruction additionally needs its destination
/// free of other writers.
///
/// # Returns
///
/// `None` if the instruction is ready, otherwise the first hazard found.
pub fn check_operands(inst: &Instruction, scoreboard: &Scoreboard) -> Option<Hazard> {
    let (uses_rs1, uses_rs2) = inst.opcode.source_operands();
    if uses_rs1 && !scoreboard.is_ready(inst.rs1) {
        return Some(Hazard::ReadAfterWrite(inst.rs1));
    }
    if uses_rs2 && !scoreboard.is_ready(inst.rs2) {
        return Some(Hazard::ReadAfterWrite(inst.rs2));
    }
    match inst.dest() {
        Some(rd) if !scoreboard.is_valid(rd) => Some(Hazard::WriteAfterWrite(rd)),
        _ => None,
    }
}

/// Whether a conditional branch in Decode must wait for the instruction in Execute.
///
/// Only `ADD`, `SUB` and `MUL` delay a branch.
pub fn branch_must_wait(inst: &Instruction, execute: &Latch) -> bool {
    inst.opcode.is_conditional_branch()
        && execute
            .instruction()
            .is_some_and(|ahead| ahead.opcode.delays_branch())
}

/// Decode's branch-wait counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchWait {
    /// No branch is waiting.
    #[default]
    NotWaiting,
    /// A branch has spent this many cycles waiting in Decode.
    Waiting(u8),
}

impl BranchWait {
    /// Advances the counter by one Decode cycle.
    ///
    /// `cycles` is the total number of cycles a delayed branch spends in
    /// Decode, counting the cycle in which it issues.
    ///
    /// # Returns
    ///
    /// The next counter value and whether the branch issues this cycle.
    pub const fn step(self, must_wait: bool, cycles: u8) -> (Self, bool) {
        match self {
            Self::NotWaiting if !must_wait || cycles <= 1 => (Self::NotWaiting, true),
            Self::NotWaiting => (Self::Waiting(1), false),
            Self::Waiting(n) if n.saturating_add(1) >= cycles => (Self::NotWaiting, true),
            Self::Waiting(n) => (Self::Waiting(n + 1), false),
        }
    }
}

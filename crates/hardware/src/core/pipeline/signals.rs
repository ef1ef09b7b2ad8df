//! Pipeline control signals and operation types.
//!
//! This module defines the signals that coordinate the stages within a tick. It provides:
//! 1. **Operation Classification:** Maps register-register opcodes onto ALU operations.
//! 2. **Backward Signals:** Flush, redirect and hold requests raised by later stages
//!    and consumed by earlier ones in the same tick.

use crate::common::reg::Word;
use crate::isa::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also used for immediates, addresses and targets).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Integer multiply (low 32 bits).
    Mul,

    /// Bitwise AND.
    And,

    /// Bitwise OR.
    Or,

    /// Bitwise XOR.
    Xor,
}

impl AluOp {
    /// The operation a three-register instruction performs, if any.
    pub const fn for_opcode(op: Opcode) -> Option<Self> {
        match op {
            Opcode::Add => Some(Self::Add),
            Opcode::Sub => Some(Self::Sub),
            Opcode::Mul => Some(Self::Mul),
            Opcode::And => Some(Self::And),
            Opcode::Or => Some(Self::Or),
            Opcode::Xor => Some(Self::Xor),
            Opcode::Movc
            | Opcode::Load
            | Opcode::Store
            | Opcode::Bz
            | Opcode::Bnz
            | Opcode::Jump
            | Opcode::Halt
            | Opcode::Nop => None,
        }
    }
}

/// Requests raised during one tick.
///
/// Stages run tail-to-head, so every field is written by a later stage
/// before the earlier stage that reads it runs. The struct is reset at the
/// start of each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    /// Writeback retired a `HALT`: discard everything in flight.
    pub flush_all: bool,
    /// Memory resolved a taken branch or jump to this target.
    pub redirect: Option<Word>,
    /// Discard the instruction currently in Execute.
    pub flush_execute: bool,
    /// Discard the instruction currently in Decode.
    pub flush_decode: bool,
    /// Execute is occupied (multi-cycle multiply); Decode may not issue.
    pub execute_busy: bool,
    /// A taken branch is in Execute; Fetch must not deliver new instructions.
    pub fetch_hold: bool,
    /// Decode's latch is free for next tick, so Fetch may deliver into it.
    pub decode_accepts: bool,
}

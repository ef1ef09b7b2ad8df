//! Decoded APEX instructions.
//!
//! Instructions arrive already decoded from the loader; there is no binary
//! encoding. Every per-stage decision is made by matching on [`Opcode`], so a
//! new opcode cannot be added without handling it everywhere.

use std::str::FromStr;

use crate::common::error::SimError;
use crate::common::reg::Word;

/// The closed set of APEX operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    /// `rd <- imm`.
    Movc,
    /// `rd <- MEM[rs1 + imm]`.
    Load,
    /// `MEM[rs2 + imm] <- rs1`.
    Store,
    /// `rd <- rs1 + rs2`.
    Add,
    /// `rd <- rs1 - rs2`.
    Sub,
    /// `rd <- rs1 * rs2`, two Execute cycles.
    Mul,
    /// `rd <- rs1 & rs2`.
    And,
    /// `rd <- rs1 | rs2`.
    Or,
    /// `rd <- rs1 ^ rs2`.
    Xor,
    /// Branch to `pc + imm` when the zero flag is set.
    Bz,
    /// Branch to `pc + imm` when the zero flag is clear.
    Bnz,
    /// Jump to `rs1 + imm`.
    Jump,
    /// Stop fetching and terminate once retired.
    Halt,
    /// Do nothing.
    #[default]
    Nop,
}

impl Opcode {
    /// Every opcode, in mnemonic table order.
    pub const ALL: [Self; 14] = [
        Self::Movc,
        Self::Load,
        Self::Store,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Bz,
        Self::Bnz,
        Self::Jump,
        Self::Halt,
        Self::Nop,
    ];

    /// Upper-case mnemonic as written in program text.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Movc => "MOVC",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "EX-OR",
            Self::Bz => "BZ",
            Self::Bnz => "BNZ",
            Self::Jump => "JUMP",
            Self::Halt => "HALT",
            Self::Nop => "NOP",
        }
    }

    /// Whether the instruction claims and later writes `rd`.
    pub const fn writes_register(self) -> bool {
        match self {
            Self::Movc
            | Self::Load
            | Self::Add
            | Self::Sub
            | Self::Mul
            | Self::And
            | Self::Or
            | Self::Xor => true,
            Self::Store | Self::Bz | Self::Bnz | Self::Jump | Self::Halt | Self::Nop => false,
        }
    }

    /// Whether the result is known at the end of Execute and may be
    /// forwarded before Writeback. Loads only know their value after Memory.
    pub const fn forwards_from_execute(self) -> bool {
        self.writes_register() && !matches!(self, Self::Load)
    }

    /// Conditional branches that consult the zero flag.
    pub const fn is_conditional_branch(self) -> bool {
        matches!(self, Self::Bz | Self::Bnz)
    }

    /// Arithmetic instructions a conditional branch in Decode must wait behind.
    pub const fn delays_branch(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul)
    }

    /// Source registers read in Decode, as `(uses_rs1, uses_rs2)`.
    pub const fn source_operands(self) -> (bool, bool) {
        match self {
            Self::Store
            | Self::Add
            | Self::Sub
            | Self::Mul
            | Self::And
            | Self::Or
            | Self::Xor => (true, true),
            Self::Load | Self::Jump => (true, false),
            Self::Movc | Self::Bz | Self::Bnz | Self::Halt | Self::Nop => (false, false),
        }
    }
}

impl FromStr for Opcode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "MOVC" => Ok(Self::Movc),
            "LOAD" => Ok(Self::Load),
            "STORE" => Ok(Self::Store),
            "ADD" => Ok(Self::Add),
            "SUB" => Ok(Self::Sub),
            "MUL" => Ok(Self::Mul),
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "EX-OR" | "XOR" => Ok(Self::Xor),
            "BZ" => Ok(Self::Bz),
            "BNZ" => Ok(Self::Bnz),
            "JUMP" => Ok(Self::Jump),
            "HALT" => Ok(Self::Halt),
            "NOP" => Ok(Self::Nop),
            _ => Err(SimError::UnsupportedOpcode(s.trim().to_string())),
        }
    }
}

/// One decoded instruction.
///
/// Fields an opcode does not use are ignored and may hold any value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Immediate / literal operand.
    pub imm: Word,
}

impl Instruction {
    /// Builds an instruction from its raw fields.
    pub const fn new(opcode: Opcode, rd: usize, rs1: usize, rs2: usize, imm: Word) -> Self {
        Self {
            opcode,
            rd,
            rs1,
            rs2,
            imm,
        }
    }

    /// `MOVC rd,#imm`.
    pub const fn movc(rd: usize, imm: Word) -> Self {
        Self::new(Opcode::Movc, rd, 0, 0, imm)
    }

    /// `LOAD rd,rs1,#imm`.
    pub const fn load(rd: usize, rs1: usize, imm: Word) -> Self {
        Self::new(Opcode::Load, rd, rs1, 0, imm)
    }

    /// `STORE rs1,rs2,#imm`: stores `rs1` at `rs2 + imm`.
    pub const fn store(rs1: usize, rs2: usize, imm: Word) -> Self {
        Self::new(Opcode::Store, 0, rs1, rs2, imm)
    }

    /// Three-register ALU form `OP rd,rs1,rs2`.
    pub const fn alu(opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::new(opcode, rd, rs1, rs2, 0)
    }

    /// `BZ #imm`.
    pub const fn bz(imm: Word) -> Self {
        Self::new(Opcode::Bz, 0, 0, 0, imm)
    }

    /// `BNZ #imm`.
    pub const fn bnz(imm: Word) -> Self {
        Self::new(Opcode::Bnz, 0, 0, 0, imm)
    }

    /// `JUMP rs1,#imm`.
    pub const fn jump(rs1: usize, imm: Word) -> Self {
        Self::new(Opcode::Jump, 0, rs1, 0, imm)
    }

    /// `HALT`.
    pub const fn halt() -> Self {
        Self::new(Opcode::Halt, 0, 0, 0, 0)
    }

    /// `NOP`.
    pub const fn nop() -> Self {
        Self::new(Opcode::Nop, 0, 0, 0, 0)
    }

    /// Destination register, if this instruction writes one.
    pub const fn dest(&self) -> Option<usize> {
        if self.opcode.writes_register() {
            Some(self.rd)
        } else {
            None
        }
    }

    /// Register indices this instruction actually reads or writes.
    pub fn used_registers(&self) -> impl Iterator<Item = usize> {
        let (uses_rs1, uses_rs2) = self.opcode.source_operands();
        [
            uses_rs1.then_some(self.rs1),
            uses_rs2.then_some(self.rs2),
            self.dest(),
        ]
        .into_iter()
        .flatten()
    }
}

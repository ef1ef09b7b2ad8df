//! Instruction text rendering.
//!
//! Produces the comma-separated form used by APEX program files
//! (`ADD,R1,R2,R3`, `MOVC,R1,#5`, `BZ,#8`). The loader accepts exactly this
//! syntax, so a rendered program can be parsed back.

use std::fmt;

use crate::isa::instruction::{Instruction, Opcode};

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        match op {
            Opcode::Movc => write!(f, "{op},R{},#{}", self.rd, self.imm),
            Opcode::Load => write!(f, "{op},R{},R{},#{}", self.rd, self.rs1, self.imm),
            Opcode::Store => write!(f, "{op},R{},R{},#{}", self.rs1, self.rs2, self.imm),
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor => write!(f, "{op},R{},R{},R{}", self.rd, self.rs1, self.rs2),
            Opcode::Bz | Opcode::Bnz => write!(f, "{op},#{}", self.imm),
            Opcode::Jump => write!(f, "{op},R{},#{}", self.rs1, self.imm),
            Opcode::Halt | Opcode::Nop => write!(f, "{op}"),
        }
    }
}

/// Renders an instruction in program-file syntax.
pub fn disassemble(inst: &Instruction) -> String {
    inst.to_string()
}

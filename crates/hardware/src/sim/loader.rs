//! Program Loader.
//!
//! This module turns APEX assembly text into the decoded instruction sequence
//! the pipeline consumes. It performs:
//! 1. **Tokenizing:** One instruction per line; fields separated by commas and/or
//!    whitespace; `;` and `//` start a comment; blank lines are skipped.
//! 2. **Operand parsing:** Registers are written `R<n>`, immediates `#<n>`.
//! 3. **Validation:** Unknown mnemonics, wrong operand counts, malformed fields and
//!    register numbers outside `R0..R31` are rejected with the offending line.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::constants::NUM_REGISTERS;
use crate::common::error::{SimError, SimResult};
use crate::common::reg::Word;
use crate::isa::{Instruction, Opcode};

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Path to the assembly source.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, otherwise as
/// [`parse_program`].
pub fn load_program(path: impl AsRef<Path>) -> SimResult<Vec<Instruction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let program = parse_program(&text)?;
    debug!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}

/// Parses assembly text into instructions, in program order.
///
/// # Examples
///
/// ```
/// use apex_core::isa::Instruction;
/// use apex_core::sim::loader::parse_program;
///
/// let program = parse_program("MOVC,R1,#5 ; set up\nHALT\n").unwrap();
/// assert_eq!(program, vec![Instruction::movc(1, 5), Instruction::halt()]);
/// ```
///
/// # Errors
///
/// - [`SimError::UnsupportedOpcode`] for an unknown mnemonic
/// - [`SimError::OperandOutOfRange`] for a register number of 32 or more
/// - [`SimError::Parse`] for any other malformed line
pub fn parse_program(text: &str) -> SimResult<Vec<Instruction>> {
    let mut program = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = strip_comment(raw);
        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        let Some(mnemonic) = fields.next() else {
            continue;
        };
        let operands: Vec<&str> = fields.collect();
        program.push(parse_line(idx + 1, mnemonic, &operands)?);
    }
    Ok(program)
}

fn strip_comment(line: &str) -> &str {
    let end = [line.find(';'), line.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..end]
}

fn parse_line(line: usize, mnemonic: &str, ops: &[&str]) -> SimResult<Instruction> {
    let opcode: Opcode = mnemonic.parse()?;
    let expected = match opcode {
        Opcode::Halt | Opcode::Nop => 0,
        Opcode::Bz | Opcode::Bnz => 1,
        Opcode::Movc | Opcode::Jump => 2,
        Opcode::Load
        | Opcode::Store
        | Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor => 3,
    };
    if ops.len() != expected {
        return Err(SimError::Parse {
            line,
            message: format!(
                "{} takes {expected} operand(s), found {}",
                opcode.mnemonic(),
                ops.len()
            ),
        });
    }

    let reg = |i: usize| register(line, ops[i]);
    let imm = |i: usize| immediate(line, ops[i]);
    Ok(match opcode {
        Opcode::Movc => Instruction::movc(reg(0)?, imm(1)?),
        Opcode::Load => Instruction::load(reg(0)?, reg(1)?, imm(2)?),
        Opcode::Store => Instruction::store(reg(0)?, reg(1)?, imm(2)?),
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor => Instruction::alu(opcode, reg(0)?, reg(1)?, reg(2)?),
        Opcode::Bz => Instruction::bz(imm(0)?),
        Opcode::Bnz => Instruction::bnz(imm(0)?),
        Opcode::Jump => Instruction::jump(reg(0)?, imm(1)?),
        Opcode::Halt => Instruction::halt(),
        Opcode::Nop => Instruction::nop(),
    })
}

fn register(line: usize, field: &str) -> SimResult<usize> {
    let digits = field
        .strip_prefix(['R', 'r'])
        .ok_or_else(|| SimError::Parse {
            line,
            message: format!("expected a register, found `{field}`"),
        })?;
    let index: usize = digits.parse().map_err(|_| SimError::Parse {
        line,
        message: format!("bad register number `{field}`"),
    })?;
    if index >= NUM_REGISTERS {
        return Err(SimError::register(index));
    }
    Ok(index)
}

fn immediate(line: usize, field: &str) -> SimResult<Word> {
    let digits = field.strip_prefix('#').ok_or_else(|| SimError::Parse {
        line,
        message: format!("expected an immediate, found `{field}`"),
    })?;
    digits.parse().map_err(|_| SimError::Parse {
        line,
        message: format!("bad immediate `{field}`"),
    })
}

//! ALU bitwise logical operations.

use crate::common::reg::Word;
use crate::core::pipeline::signals::AluOp;

/// Executes a bitwise logical operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The bitwise result. Returns `0` for non-logic opcodes.
pub const fn execute(op: AluOp, a: Word, b: Word) -> Word {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Add | AluOp::Sub | AluOp::Mul => 0,
    }
}

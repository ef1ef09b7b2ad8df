//! ALU arithmetic operations.
//!
//! Implements integer addition, subtraction and multiplication on 32-bit
//! signed words. Overflow wraps; there is no carry or overflow flag.

use crate::common::reg::Word;
use crate::core::pipeline::signals::AluOp;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The wrapped result. Returns `0` for non-arithmetic opcodes.
pub const fn execute(op: AluOp, a: Word, b: Word) -> Word {
    match op {
        AluOp::Add => a.wrapping_add(b),
        // Subtraction is addition of the two's-complement negation.
        AluOp::Sub => a.wrapping_add(b.wrapping_neg()),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::And | AluOp::Or | AluOp::Xor => 0,
    }
}

//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. Every
//! operation works on 32-bit signed words with wrapping arithmetic and, when
//! issued through [`Alu::execute`], updates the shared zero flag consumed by
//! conditional branches.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul
//! - [`logic`]:      And, Or, Xor

/// Integer arithmetic operations (add, subtract, multiply).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor).
pub mod logic;

use crate::common::reg::Word;
use crate::core::pipeline::signals::AluOp;

/// The integer ALU and the zero flag it drives.
///
/// The flag is a single shared bit: whichever operation completed most
/// recently decides it, regardless of which instruction consumes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Alu {
    zero: bool,
}

impl Alu {
    /// Creates an ALU with the zero flag clear.
    pub const fn new() -> Self {
        Self { zero: false }
    }

    /// Computes `op(a, b)` without touching the zero flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use apex_core::core::pipeline::signals::AluOp;
    /// use apex_core::core::units::alu::Alu;
    ///
    /// assert_eq!(Alu::compute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::compute(AluOp::Sub, 3, 5), -2);
    /// assert_eq!(Alu::compute(AluOp::Add, i32::MAX, 1), i32::MIN);
    /// assert_eq!(Alu::compute(AluOp::Xor, 0b1100, 0b1010), 0b0110);
    /// ```
    pub const fn compute(op: AluOp, a: Word, b: Word) -> Word {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Xor => logic::execute(op, a, b),
        }
    }

    /// Executes `op(a, b)` and sets the zero flag iff the result is zero.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand
    ///
    /// # Returns
    ///
    /// The wrapped 32-bit result.
    pub const fn execute(&mut self, op: AluOp, a: Word, b: Word) -> Word {
        let result = Self::compute(op, a, b);
        self.zero = result == 0;
        result
    }

    /// Current value of the zero flag.
    pub const fn zero_flag(&self) -> bool {
        self.zero
    }
}

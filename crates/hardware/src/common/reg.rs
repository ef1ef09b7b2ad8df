//! Architectural Register File.
//!
//! Holds the 32 general-purpose register values. Validity (whether an
//! in-flight instruction still owes a register a value) is tracked separately
//! by the [`Scoreboard`](crate::core::pipeline::scoreboard::Scoreboard); this
//! structure only stores committed values.

use crate::common::constants::NUM_REGISTERS;
use crate::common::error::{SimError, SimResult};

/// Datapath word: a 32-bit signed integer with wrapping arithmetic.
pub type Word = i32;

/// The architectural general-purpose registers `R0..R31`.
///
/// APEX has no hardwired zero register; `R0` is an ordinary register.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [Word; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OperandOutOfRange`] if `idx >= 32`.
    pub fn read(&self, idx: usize) -> SimResult<Word> {
        self.regs.get(idx).copied().ok_or(SimError::register(idx))
    }

    /// Writes a register.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OperandOutOfRange`] if `idx >= 32`.
    pub fn write(&mut self, idx: usize, val: Word) -> SimResult<()> {
        let slot = self.regs.get_mut(idx).ok_or(SimError::register(idx))?;
        *slot = val;
        Ok(())
    }

    /// Returns a copy of every register value, indexed by register number.
    pub const fn dump(&self) -> [Word; NUM_REGISTERS] {
        self.regs
    }
}

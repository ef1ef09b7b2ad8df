//! Register validity scoreboard.
//!
//! Tracks, for each architectural register, whether an in-flight instruction
//! still owes it a value. A register is claimed when its writer issues from
//! Decode into Execute and released when Writeback commits the value. Between
//! the two, a result computed in Execute may be published early so that
//! dependent instructions can read it before the commit.

use crate::common::constants::NUM_REGISTERS;
use crate::common::reg::Word;

/// Availability of one register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegState {
    /// The register file holds the current value.
    #[default]
    Valid,
    /// A writer has issued and its result is not known yet.
    Pending,
    /// The writer's result is known (forwarded from Execute) but not yet committed.
    Forwarded(Word),
}

/// Per-register validity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    regs: [RegState; NUM_REGISTERS],
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Create a new scoreboard with every register valid.
    pub const fn new() -> Self {
        Self {
            regs: [RegState::Valid; NUM_REGISTERS],
        }
    }

    /// State of `reg`. Out-of-range indices read as `Valid`; Decode rejects
    /// them before consulting the scoreboard.
    pub fn state(&self, reg: usize) -> RegState {
        self.regs.get(reg).copied().unwrap_or_default()
    }

    /// Mark `reg` as owed a value by a newly issued writer.
    pub fn claim(&mut self, reg: usize) {
        if let Some(slot) = self.regs.get_mut(reg) {
            *slot = RegState::Pending;
        }
    }

    /// Publish a pending writer's result ahead of Writeback.
    /// No-op unless the register is currently `Pending`.
    pub fn forward(&mut self, reg: usize, value: Word) {
        if let Some(slot @ RegState::Pending) = self.regs.get_mut(reg) {
            *slot = RegState::Forwarded(value);
        }
    }

    /// The writer committed its value to the register file.
    pub fn release(&mut self, reg: usize) {
        if let Some(slot) = self.regs.get_mut(reg) {
            *slot = RegState::Valid;
        }
    }

    /// The writer was flushed before committing; the register file value stands.
    pub fn cancel(&mut self, reg: usize) {
        self.release(reg);
    }

    /// Whether a reader may take `reg`'s value now.
    pub fn is_ready(&self, reg: usize) -> bool {
        !matches!(self.state(reg), RegState::Pending)
    }

    /// Whether no writer is in flight for `reg`.
    pub fn is_valid(&self, reg: usize) -> bool {
        self.state(reg) == RegState::Valid
    }

    /// The early-published value for `reg`, if its writer forwarded one.
    pub fn forwarded(&self, reg: usize) -> Option<Word> {
        match self.state(reg) {
            RegState::Forwarded(v) => Some(v),
            RegState::Valid | RegState::Pending => None,
        }
    }

    /// Validity bitmap, indexed by register number.
    pub fn validity(&self) -> [bool; NUM_REGISTERS] {
        self.regs.map(|s| s == RegState::Valid)
    }
}

//! Builders for latch entries and programs.

use apex_core::common::Word;
use apex_core::core::pipeline::latches::{Latch, LatchEntry};
use apex_core::isa::Instruction;
use apex_core::sim::parse_program;

/// Parses assembly text, panicking on malformed input.
pub fn asm(text: &str) -> Vec<Instruction> {
    parse_program(text).expect("test program must parse")
}

/// Fluent construction of a [`LatchEntry`].
pub struct EntryBuilder(LatchEntry);

impl EntryBuilder {
    pub fn new(inst: Instruction) -> Self {
        Self(LatchEntry::fetched(4000, inst))
    }

    pub fn pc(mut self, pc: Word) -> Self {
        self.0.pc = pc;
        self
    }

    pub fn rs1(mut self, val: Word) -> Self {
        self.0.rs1_value = val;
        self
    }

    pub fn rs2(mut self, val: Word) -> Self {
        self.0.rs2_value = val;
        self
    }

    pub fn buffer(mut self, val: Word) -> Self {
        self.0.buffer = val;
        self
    }

    pub fn taken(mut self) -> Self {
        self.0.taken = true;
        self
    }

    pub fn build(self) -> LatchEntry {
        self.0
    }

    /// The entry wrapped in an occupied latch.
    pub fn latch(self) -> Latch {
        Latch::occupied(self.0)
    }
}

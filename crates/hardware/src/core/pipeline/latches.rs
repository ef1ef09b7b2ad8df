//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the record carried through the five-stage pipeline:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** `LatchEntry` carries an instruction with its operand
//!    values and the result computed so far.
//! 2. **Bubbles:** An empty latch (`entry == None`) is a bubble, distinct from a
//!    program `NOP`, which occupies a latch and retires like any instruction.
//! 3. **Snapshots:** `PipelineLatches` holds one latch per stage; the CPU keeps
//!    two snapshots and swaps them at every tick boundary.

use std::fmt;

use crate::common::reg::Word;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;

/// Pipeline stage identifiers, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and register read.
    Decode,
    /// ALU, multiply and branch evaluation.
    Execute,
    /// Data memory access and branch redirect.
    Memory,
    /// Register commit and retirement.
    Writeback,
}

impl Stage {
    /// Every stage, head to tail.
    pub const ALL: [Self; 5] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
    ];

    /// Human-readable stage name used in traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode/RF",
            Self::Execute => "Execute",
            Self::Memory => "Memory",
            Self::Writeback => "Writeback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// An in-flight instruction and the values it has accumulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatchEntry {
    /// Address of the instruction.
    pub pc: Word,
    /// The decoded instruction.
    pub inst: Instruction,
    /// Value read for `rs1` in Decode.
    pub rs1_value: Word,
    /// Value read for `rs2` in Decode.
    pub rs2_value: Word,
    /// Result so far: ALU result, effective address, loaded value or branch target.
    pub buffer: Word,
    /// Execute decided that this control instruction redirects.
    pub taken: bool,
}

impl LatchEntry {
    /// Wraps a freshly fetched instruction.
    pub const fn fetched(pc: Word, inst: Instruction) -> Self {
        Self {
            pc,
            inst,
            rs1_value: 0,
            rs2_value: 0,
            buffer: 0,
            taken: false,
        }
    }
}

impl fmt::Display for LatchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pc({}) {}", self.pc, self.inst)
    }
}

/// One stage's latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latch {
    /// The occupying instruction, or `None` for a bubble.
    pub entry: Option<LatchEntry>,
    /// The instruction was held in place this cycle instead of advancing.
    pub stalled: bool,
}

impl Latch {
    /// A latch that carries `entry` forward.
    pub const fn occupied(entry: LatchEntry) -> Self {
        Self {
            entry: Some(entry),
            stalled: false,
        }
    }

    /// A latch that holds `entry` back for another cycle.
    pub const fn held(entry: LatchEntry) -> Self {
        Self {
            entry: Some(entry),
            stalled: true,
        }
    }

    /// The occupying instruction's opcode-level view, if any.
    pub fn instruction(&self) -> Option<&Instruction> {
        self.entry.as_ref().map(|e| &e.inst)
    }
}

impl PipelineLatch for Latch {
    fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// One latch per stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineLatches {
    /// Instruction prefetched while Decode was stalled.
    pub fetch: Latch,
    /// Instruction being decoded.
    pub decode: Latch,
    /// Instruction in Execute.
    pub execute: Latch,
    /// Instruction in Memory.
    pub memory: Latch,
    /// Instruction retiring this cycle.
    pub writeback: Latch,
}

impl PipelineLatches {
    /// The latch belonging to `stage`.
    pub const fn get(&self, stage: Stage) -> &Latch {
        match stage {
            Stage::Fetch => &self.fetch,
            Stage::Decode => &self.decode,
            Stage::Execute => &self.execute,
            Stage::Memory => &self.memory,
            Stage::Writeback => &self.writeback,
        }
    }

    /// Whether every latch holds a bubble.
    pub fn is_drained(&self) -> bool {
        Stage::ALL.iter().all(|&s| self.get(s).is_empty())
    }
}

//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, the scoreboard, the program counter
//!    and the zero flag (held by the ALU).
//! 2. **Pipeline Control:** Manages latches and shadow latches for five-stage execution.
//! 3. **Stage Sub-state:** Multiply progress, fetch prefetch and Decode's branch wait.
//! 4. **Termination:** Records why and when the run stopped.

/// Per-cycle pipeline orchestration.
pub mod execution;

/// Word-addressable data memory.
pub mod memory;

use crate::common::constants::{CODE_BASE_ADDRESS, INSTRUCTION_SIZE};
use crate::common::error::{SimError, SimResult};
use crate::common::reg::{RegisterFile, Word};
use crate::config::{Config, PipelineConfig};
use crate::core::pipeline::hazards::BranchWait;
use crate::core::pipeline::latches::PipelineLatches;
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::pipeline::signals::Signals;
use crate::core::pipeline::stages::fetch::FetchState;
use crate::core::units::alu::Alu;
use crate::core::units::multiplier::Multiplier;
use crate::isa::Instruction;
use crate::stats::SimStats;

pub use self::memory::DataMemory;

/// Why the pipeline stopped on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopCause {
    /// A `HALT` retired.
    Halt,
    /// The last instruction of the program retired.
    LastInstruction,
}

/// Main CPU structure containing all processor state and components.
///
/// Stages read `latches` (the state every stage held at the start of the
/// tick) and write `shadow`; the two are swapped at the end of each tick.
#[derive(Debug)]
pub struct Cpu {
    /// General purpose registers.
    pub regs: RegisterFile,
    /// Register validity.
    pub scoreboard: Scoreboard,
    /// Data memory.
    pub data: DataMemory,
    /// The program, indexed by `(pc - 4000) / 4`.
    pub program: Vec<Instruction>,
    /// Address of the next instruction to fetch.
    pub pc: Word,

    /// Integer ALU and the zero flag.
    pub alu: Alu,
    /// Multiply progress.
    pub mul: Multiplier,
    /// Whether Fetch holds a prefetched instruction.
    pub fetch_state: FetchState,
    /// Decode's branch-wait counter.
    pub branch_wait: BranchWait,
    /// A `HALT` passed Execute; Fetch and Decode stay empty from now on.
    pub draining: bool,
    /// Set when Writeback retires the final instruction.
    pub stop: Option<StopCause>,

    /// Latches as of the start of the current tick.
    pub latches: PipelineLatches,
    /// Latches being built for the next tick.
    pub shadow: PipelineLatches,
    /// Backward signals raised during the current tick.
    pub signals: Signals,

    /// Pipeline behaviour switches.
    pub pipeline: PipelineConfig,
    /// Emit a per-stage line every cycle.
    pub trace: bool,
    /// Performance counters.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU ready to fetch the first instruction of `program`.
    ///
    /// # Arguments
    ///
    /// * `program` - Decoded instructions; the first sits at address 4000.
    /// * `config` - Simulator configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Initialization`] if the program is empty or does
    /// not fit in the 32-bit address space, or if the configuration is invalid.
    pub fn new(program: Vec<Instruction>, config: &Config) -> SimResult<Self> {
        config.validate()?;
        if program.is_empty() {
            return Err(SimError::Initialization("program is empty".into()));
        }
        let max_len = ((i32::MAX - CODE_BASE_ADDRESS) / INSTRUCTION_SIZE) as usize;
        if program.len() > max_len {
            return Err(SimError::Initialization(format!(
                "program of {} instructions exceeds the code address space",
                program.len()
            )));
        }

        Ok(Self {
            regs: RegisterFile::new(),
            scoreboard: Scoreboard::new(),
            data: DataMemory::new(config.memory.data_words),
            program,
            pc: CODE_BASE_ADDRESS,
            alu: Alu::new(),
            mul: Multiplier::new(),
            fetch_state: FetchState::default(),
            branch_wait: BranchWait::default(),
            draining: false,
            stop: None,
            latches: PipelineLatches::default(),
            shadow: PipelineLatches::default(),
            signals: Signals::default(),
            pipeline: config.pipeline.clone(),
            trace: config.general.trace,
            stats: SimStats::default(),
        })
    }

    /// The instruction at `pc`, or `None` if `pc` is outside the program.
    pub fn instruction_at(&self, pc: Word) -> Option<Instruction> {
        let offset = pc.checked_sub(CODE_BASE_ADDRESS)?;
        if offset < 0 || offset % INSTRUCTION_SIZE != 0 {
            return None;
        }
        self.program
            .get((offset / INSTRUCTION_SIZE) as usize)
            .copied()
    }

    /// Address of the last instruction in the program.
    pub fn last_pc(&self) -> Word {
        CODE_BASE_ADDRESS + (self.program.len() as Word - 1) * INSTRUCTION_SIZE
    }

    /// Whether the pipeline has stopped.
    pub const fn is_stopped(&self) -> bool {
        self.stop.is_some()
    }

    /// Reads a source operand, taking a forwarded value over the register file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OperandOutOfRange`] for an index outside `R0..R31`.
    pub fn read_operand(&self, reg: usize) -> SimResult<Word> {
        match self.scoreboard.forwarded(reg) {
            Some(v) => Ok(v),
            None => self.regs.read(reg),
        }
    }
}

//! Simulator: the public face of the pipeline.
//!
//! Owns the [`Cpu`] and exposes run-to-completion, single stepping and
//! read-only access to the architectural state once (or while) a program runs.

use std::fmt;

use tracing::{debug, info};

use crate::common::constants::NUM_REGISTERS;
use crate::common::error::SimResult;
use crate::common::reg::Word;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::{DataMemory, StopCause};
use crate::core::pipeline::latches::PipelineLatches;
use crate::isa::Instruction;
use crate::isa::disasm::disassemble;
use crate::stats::SimStats;

/// How much a run reports while it executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Emit every stage's contents every cycle.
    Trace,
    /// Run quietly.
    #[default]
    Silent,
}

/// Why [`Simulator::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The program stopped on its own (`HALT` or last instruction retired).
    CompletedNormally,
    /// The cycle budget ran out first.
    CycleBudgetExceeded,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompletedNormally => f.write_str("completed normally"),
            Self::CycleBudgetExceeded => f.write_str("cycle budget exceeded"),
        }
    }
}

/// Register values together with their validity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterSnapshot {
    /// Committed value of each register.
    pub values: [Word; NUM_REGISTERS],
    /// Whether each register has no writer in flight.
    pub valid: [bool; NUM_REGISTERS],
}

impl RegisterSnapshot {
    /// Value and validity of register `idx`.
    pub fn get(&self, idx: usize) -> Option<(Word, bool)> {
        Some((*self.values.get(idx)?, *self.valid.get(idx)?))
    }
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// Processor state.
    pub cpu: Cpu,
}

impl Simulator {
    /// Creates a simulator for `program`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Initialization`](crate::common::SimError) if the
    /// program is empty or the configuration is invalid.
    pub fn new(program: Vec<Instruction>, config: &Config) -> SimResult<Self> {
        let cpu = Cpu::new(program, config)?;
        info!(instructions = cpu.program.len(), "initialized APEX CPU");
        for (i, inst) in cpu.program.iter().enumerate() {
            debug!(index = i, "{}", disassemble(inst));
        }
        Ok(Self { cpu })
    }

    /// Runs until the program stops or `max_cycles` more cycles have elapsed.
    ///
    /// # Arguments
    ///
    /// * `mode` - Whether to trace every stage each cycle.
    /// * `max_cycles` - Cycle budget for this call.
    ///
    /// # Errors
    ///
    /// Propagates the first stage error; committed state is left as it was.
    pub fn run(&mut self, mode: RunMode, max_cycles: u64) -> SimResult<Termination> {
        let saved_trace = self.cpu.trace;
        self.cpu.trace = mode == RunMode::Trace;
        let start = self.cpu.stats.cycles;
        info!(max_cycles, "simulation started");

        let result = loop {
            if self.cpu.is_stopped() {
                break Ok(Termination::CompletedNormally);
            }
            if self.cpu.stats.cycles - start >= max_cycles {
                break Ok(Termination::CycleBudgetExceeded);
            }
            if let Err(err) = self.cpu.tick() {
                break Err(err);
            }
        };

        self.cpu.trace = saved_trace;
        match &result {
            Ok(reason) => info!(
                cycles = self.cpu.stats.cycles,
                retired = self.cpu.stats.instructions_retired,
                "simulation {reason}"
            ),
            Err(err) => info!(cycles = self.cpu.stats.cycles, "simulation aborted: {err}"),
        }
        result
    }

    /// Advances one cycle. Does nothing once the program has stopped.
    ///
    /// # Errors
    ///
    /// Propagates a stage error.
    pub fn step(&mut self) -> SimResult<()> {
        if self.cpu.is_stopped() {
            return Ok(());
        }
        self.cpu.tick()
    }

    /// Whether the program has stopped on its own.
    pub const fn is_stopped(&self) -> bool {
        self.cpu.is_stopped()
    }

    /// Why the program stopped, if it has.
    pub const fn stop_cause(&self) -> Option<StopCause> {
        self.cpu.stop
    }

    /// Contents of every stage as of the last completed cycle.
    pub const fn latches(&self) -> &PipelineLatches {
        &self.cpu.latches
    }

    /// Register values and validity.
    pub fn registers(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            values: self.cpu.regs.dump(),
            valid: self.cpu.scoreboard.validity(),
        }
    }

    /// All of data memory.
    pub const fn data_memory(&self) -> &DataMemory {
        &self.cpu.data
    }

    /// The leading data-memory words shown in the post-run dump.
    pub fn memory_prefix(&self) -> &[Word] {
        self.cpu.data.prefix()
    }

    /// Seeds a register before the run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OperandOutOfRange`](crate::common::SimError) for a bad index.
    pub fn set_register(&mut self, idx: usize, val: Word) -> SimResult<()> {
        self.cpu.regs.write(idx, val)
    }

    /// Seeds a data-memory word before the run.
    ///
    /// # Errors
    ///
    /// Returns an error if `addr` is misaligned or outside data memory.
    pub fn write_memory(&mut self, addr: Word, val: Word) -> SimResult<()> {
        self.cpu.data.write(addr, val)
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Cycles elapsed.
    pub const fn cycles(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Address of the next instruction to fetch.
    pub const fn pc(&self) -> Word {
        self.cpu.pc
    }

    /// Current value of the zero flag.
    pub const fn zero_flag(&self) -> bool {
        self.cpu.alu.zero_flag()
    }
}

//! Main Execution Loop.
//!
//! This module implements one clock cycle of the CPU. It performs the following:
//! 1. **Stage Sequencing:** Runs Writeback, Memory, Execute, Decode and Fetch in that
//!    order so backward signals are raised before the stages that consume them.
//! 2. **Latch Swap:** Publishes the shadow latches as the next cycle's state.
//! 3. **Observability:** Emits the per-stage trace when tracing is enabled.

use tracing::{info, trace};

use super::Cpu;
use crate::common::error::SimResult;
use crate::core::pipeline::latches::{LatchEntry, PipelineLatches, Stage};
use crate::core::pipeline::signals::Signals;
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};

impl Cpu {
    /// Advances the pipeline by one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by a stage. The register file and
    /// data memory keep whatever had been committed before the error.
    pub fn tick(&mut self) -> SimResult<()> {
        self.signals = Signals::default();
        self.shadow = PipelineLatches::default();

        if self.trace {
            info!(target: "apex::trace", "Clock Cycle #: {}", self.stats.cycles + 1);
        }

        wb_stage(self)?;
        mem_stage(self)?;
        execute_stage(self)?;
        decode_stage(self)?;
        fetch_stage(self);

        std::mem::swap(&mut self.latches, &mut self.shadow);
        self.stats.cycles += 1;
        trace!(cycle = self.stats.cycles, pc = self.pc, "tick");
        Ok(())
    }

    /// Emits one trace line for the instruction a stage processed this cycle.
    pub fn trace_stage(&self, stage: Stage, entry: Option<&LatchEntry>) {
        if !self.trace {
            return;
        }
        match entry {
            Some(e) => info!(target: "apex::trace", "{stage:<15}: {e}"),
            None => info!(target: "apex::trace", "{stage:<15}: Empty"),
        }
    }
}

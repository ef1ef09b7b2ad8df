//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the APEX pipeline. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, control).
//! 3. **Stalls:** Data, structural (multiply) and control stall cycles.
//! 4. **Control flow:** Taken branches, flushed instructions and prefetches.

use std::fmt;
use std::time::Instant;

use crate::isa::Opcode;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired (bubbles excluded).
    pub instructions_retired: u64,

    /// Count of register-writing ALU instructions retired (including `MOVC` and `MUL`).
    pub inst_alu: u64,
    /// Count of `LOAD` instructions retired.
    pub inst_load: u64,
    /// Count of `STORE` instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of `MUL` instructions started in Execute.
    pub multiplies: u64,

    /// Decode cycles lost waiting for a source or destination register.
    pub stalls_data: u64,
    /// Decode cycles lost while a multiply occupied Execute.
    pub stalls_structural: u64,
    /// Cycles lost to the branch wait or to Fetch holding behind a taken branch.
    pub stalls_control: u64,

    /// Branches and jumps that redirected the program counter.
    pub branches_taken: u64,
    /// Instructions discarded by a redirect or a retiring `HALT`.
    pub flushes: u64,
    /// Instructions fetched ahead while Decode was stalled.
    pub prefetches: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            multiplies: 0,
            stalls_data: 0,
            stalls_structural: 0,
            stalls_control: 0,
            branches_taken: 0,
            flushes: 0,
            prefetches: 0,
        }
    }
}

impl SimStats {
    /// Counts one retired instruction in the mix.
    pub const fn record_retire(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        match op {
            Opcode::Load => self.inst_load += 1,
            Opcode::Store => self.inst_store += 1,
            Opcode::Bz | Opcode::Bnz | Opcode::Jump => self.inst_branch += 1,
            Opcode::Movc
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor => self.inst_alu += 1,
            Opcode::Halt | Opcode::Nop => {}
        }
    }

    /// Cycles per retired instruction, or `0.0` before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        writeln!(f, "==========================================================")?;
        writeln!(f, "APEX PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  op.alu                 {}", self.inst_alu)?;
        writeln!(f, "  op.load                {}", self.inst_load)?;
        writeln!(f, "  op.store               {}", self.inst_store)?;
        writeln!(f, "  op.branch              {}", self.inst_branch)?;
        writeln!(f, "  op.mul_started         {}", self.multiplies)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "STALLS")?;
        for (name, count) in [
            ("stall.data", self.stalls_data),
            ("stall.structural", self.stalls_structural),
            ("stall.control", self.stalls_control),
        ] {
            writeln!(
                f,
                "  {name:<22} {count} ({:.2}%)",
                (count as f64 / cyc) * 100.0
            )?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CONTROL FLOW")?;
        writeln!(f, "  branch.taken           {}", self.branches_taken)?;
        writeln!(f, "  pipeline.flushed       {}", self.flushes)?;
        write!(f, "  fetch.prefetched       {}", self.prefetches)
    }
}

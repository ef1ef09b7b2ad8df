//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It performs:
//! 1. **Operand Validation:** Rejects register indices outside the register file.
//! 2. **Hazard Detection:** Holds the instruction while a source is pending, its
//!    destination has a writer in flight, or Execute is occupied by a multiply.
//! 3. **Branch Wait:** Keeps a conditional branch behind an arithmetic instruction
//!    for the configured number of cycles.
//! 4. **Register Read:** Reads operands (forwarded values first) and claims the
//!    destination register as the instruction issues into Execute.
//!
//! A held instruction leaves a bubble in Execute.

use tracing::debug;

use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, BranchWait};
use crate::core::pipeline::latches::{Latch, LatchEntry, Stage};

/// Executes the decode stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Errors
///
/// Returns [`SimError::OperandOutOfRange`](crate::common::SimError) if the
/// instruction names a register outside `R0..R31`.
pub fn decode_stage(cpu: &mut Cpu) -> SimResult<()> {
    let latch = cpu.latches.decode;
    cpu.trace_stage(Stage::Decode, latch.entry.as_ref());

    if cpu.draining || cpu.signals.flush_all || cpu.signals.flush_decode {
        if let Some(entry) = latch.entry {
            debug!(pc = entry.pc, "flushing {} from Decode", entry.inst);
            cpu.stats.flushes += 1;
        }
        cpu.branch_wait = BranchWait::NotWaiting;
        return Ok(());
    }

    let Some(mut entry) = latch.entry else {
        cpu.signals.decode_accepts = true;
        return Ok(());
    };
    hazards::validate_registers(&entry.inst)?;

    if cpu.signals.execute_busy {
        // Keep operand values current while the multiply drains.
        read_ready_operands(cpu, &mut entry)?;
        cpu.stats.stalls_structural += 1;
        cpu.shadow.decode = Latch::held(entry);
        return Ok(());
    }

    if entry.inst.opcode.is_conditional_branch() {
        let must_wait = hazards::branch_must_wait(&entry.inst, &cpu.latches.execute);
        let (next, issue) = cpu
            .branch_wait
            .step(must_wait, cpu.pipeline.branch_wait_cycles);
        cpu.branch_wait = next;
        if !issue {
            debug!(pc = entry.pc, wait = ?next, "branch waiting for zero flag");
            cpu.stats.stalls_control += 1;
            cpu.shadow.decode = Latch::held(entry);
            return Ok(());
        }
    } else if let Some(hazard) = hazards::check_operands(&entry.inst, &cpu.scoreboard) {
        debug!(pc = entry.pc, ?hazard, "decode stall on {}", entry.inst);
        cpu.stats.stalls_data += 1;
        cpu.shadow.decode = Latch::held(entry);
        return Ok(());
    }

    read_ready_operands(cpu, &mut entry)?;
    if let Some(rd) = entry.inst.dest() {
        cpu.scoreboard.claim(rd);
    }
    cpu.shadow.execute = Latch::occupied(entry);
    cpu.signals.decode_accepts = true;
    Ok(())
}

/// Reads every source operand whose value is available.
///
/// At issue all sources are ready, so this reads them all.
fn read_ready_operands(cpu: &Cpu, entry: &mut LatchEntry) -> SimResult<()> {
    let (uses_rs1, uses_rs2) = entry.inst.opcode.source_operands();
    if uses_rs1 && cpu.scoreboard.is_ready(entry.inst.rs1) {
        entry.rs1_value = cpu.read_operand(entry.inst.rs1)?;
    }
    if uses_rs2 && cpu.scoreboard.is_ready(entry.inst.rs2) {
        entry.rs2_value = cpu.read_operand(entry.inst.rs2)?;
    }
    Ok(())
}

//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file, releases the scoreboard entry,
//! counts the retirement and decides whether the run is over. A retiring
//! `HALT` drains every other stage in the same cycle.

use tracing::debug;

use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::cpu::StopCause;
use crate::core::pipeline::latches::Stage;
use crate::isa::Opcode;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - Writes `buffer` to `rd` for every register-writing opcode and marks `rd` valid
/// - Counts the instruction as retired (bubbles are not counted)
/// - Stops the run when `HALT` retires or the program's last instruction retires
///
/// # Errors
///
/// Returns [`SimError::OperandOutOfRange`](crate::common::SimError) if `rd`
/// is not a register.
pub fn wb_stage(cpu: &mut Cpu) -> SimResult<()> {
    let latch = cpu.latches.writeback;
    cpu.trace_stage(Stage::Writeback, latch.entry.as_ref());
    let Some(entry) = latch.entry else {
        return Ok(());
    };

    if let Some(rd) = entry.inst.dest() {
        cpu.regs.write(rd, entry.buffer)?;
        cpu.scoreboard.release(rd);
    }
    cpu.stats.record_retire(entry.inst.opcode);

    if entry.inst.opcode == Opcode::Halt {
        debug!(pc = entry.pc, "HALT retired, draining pipeline");
        cpu.stop = Some(StopCause::Halt);
        cpu.signals.flush_all = true;
    } else if entry.pc == cpu.last_pc() {
        debug!(pc = entry.pc, "last instruction retired");
        cpu.stop = Some(StopCause::LastInstruction);
    }
    Ok(())
}

//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It performs:
//! 1. **Data Access:** `LOAD` reads and `STORE` writes data memory at the
//!    address computed in Execute.
//! 2. **Branch Redirect:** A taken branch or jump sets the program counter and
//!    flushes the younger instructions in Execute and Decode.
//! 3. **Halt Drain:** A `HALT` flushes whatever followed it into Execute.
//! 4. **Advancement:** The instruction moves on to Writeback.

use tracing::debug;

use crate::common::error::{SimError, SimResult};
use crate::common::reg::Word;
use crate::config::BranchSemantics;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, LatchEntry, Stage};
use crate::core::pipeline::signals::AluOp;
use crate::isa::Opcode;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Errors
///
/// Returns an error if a `LOAD` or `STORE` address is misaligned or
/// outside data memory, or if a taken branch or jump targets an address
/// holding no instruction.
pub fn mem_stage(cpu: &mut Cpu) -> SimResult<()> {
    let latch = cpu.latches.memory;
    cpu.trace_stage(Stage::Memory, latch.entry.as_ref());
    let Some(mut entry) = latch.entry else {
        return Ok(());
    };
    if cpu.signals.flush_all {
        cpu.stats.flushes += 1;
        return Ok(());
    }

    match entry.inst.opcode {
        Opcode::Store => cpu.data.write(entry.buffer, entry.rs1_value)?,
        Opcode::Load => entry.buffer = cpu.data.read(entry.buffer)?,
        Opcode::Bz | Opcode::Bnz | Opcode::Jump => {
            if let Some(target) = resolve_control(cpu, &mut entry) {
                if cpu.instruction_at(target).is_none() {
                    return Err(SimError::instruction_address(target));
                }
                debug!(pc = entry.pc, target, "{} taken", entry.inst.opcode);
                cpu.signals.redirect = Some(target);
                cpu.signals.flush_execute = true;
                cpu.signals.flush_decode = true;
                cpu.stats.branches_taken += 1;
            }
        }
        Opcode::Halt => cpu.signals.flush_execute = true,
        Opcode::Movc
        | Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Nop => {}
    }

    cpu.shadow.writeback = Latch::occupied(entry);
    Ok(())
}

/// Decides whether a control instruction redirects, returning its target.
///
/// Architecturally the decision was made in Execute. Legacy resolution
/// re-checks the zero flag here (redirecting while it is clear, for every
/// control opcode) and recomputes the target through the ALU, which
/// overwrites the flag.
fn resolve_control(cpu: &mut Cpu, entry: &mut LatchEntry) -> Option<Word> {
    match cpu.pipeline.branch_semantics {
        BranchSemantics::Architectural => entry.taken.then_some(entry.buffer),
        BranchSemantics::Legacy => {
            if cpu.alu.zero_flag() {
                return None;
            }
            let base = if entry.inst.opcode == Opcode::Jump {
                entry.rs1_value
            } else {
                entry.pc
            };
            entry.buffer = cpu.alu.execute(AluOp::Add, base, entry.inst.imm);
            entry.taken = true;
            Some(entry.buffer)
        }
    }
}

//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Result Forwarding:** Publishes the result of the instruction that left
//!    Execute last cycle so Decode can read it before Writeback commits it.
//! 2. **ALU Execution:** Computes register-register results, `MOVC` immediates and
//!    effective addresses.
//! 3. **Multiply:** Holds `MUL` in Execute for two cycles, stalling Decode meanwhile.
//! 4. **Branch Evaluation:** Decides whether a branch or jump is taken and holds
//!    Fetch while the redirect is pending.
//! 5. **Halt:** Starts draining Fetch and Decode.

use tracing::debug;

use crate::common::error::SimResult;
use crate::common::reg::Word;
use crate::config::BranchSemantics;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, LatchEntry, Stage};
use crate::core::pipeline::signals::AluOp;
use crate::core::units::alu::Alu;
use crate::core::units::multiplier::MulState;
use crate::isa::Opcode;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - Forwards the Memory-stage result to the scoreboard (when enabled)
/// - Discards its instruction when Memory or Writeback requested a flush
/// - Otherwise computes the instruction's result into `buffer` and passes it to Memory
pub fn execute_stage(cpu: &mut Cpu) -> SimResult<()> {
    forward_from_memory(cpu);

    let latch = cpu.latches.execute;
    cpu.trace_stage(Stage::Execute, latch.entry.as_ref());
    let mul_state = cpu.mul.advance();

    if cpu.signals.flush_all || cpu.signals.flush_execute {
        if let Some(entry) = latch.entry {
            discard(cpu, &entry);
        }
        return Ok(());
    }

    let Some(mut entry) = latch.entry else {
        return Ok(());
    };

    if mul_state == MulState::MultiplyCycle1 {
        debug!(pc = entry.pc, "multiply leaves Execute");
        cpu.signals.execute_busy = true;
        cpu.shadow.memory = Latch::occupied(entry);
        return Ok(());
    }

    let semantics = cpu.pipeline.branch_semantics;
    let imm = entry.inst.imm;
    match entry.inst.opcode {
        Opcode::Movc => entry.buffer = cpu.alu.execute(AluOp::Add, imm, 0),
        Opcode::Add => alu_rr(cpu, &mut entry, AluOp::Add),
        Opcode::Sub => alu_rr(cpu, &mut entry, AluOp::Sub),
        Opcode::And => alu_rr(cpu, &mut entry, AluOp::And),
        Opcode::Or => alu_rr(cpu, &mut entry, AluOp::Or),
        Opcode::Xor => alu_rr(cpu, &mut entry, AluOp::Xor),
        Opcode::Mul => {
            alu_rr(cpu, &mut entry, AluOp::Mul);
            cpu.mul.start();
            cpu.stats.multiplies += 1;
            cpu.signals.execute_busy = true;
            cpu.shadow.execute = Latch::held(entry);
            return Ok(());
        }
        Opcode::Load => entry.buffer = address_add(cpu, semantics, entry.rs1_value, imm),
        Opcode::Store => entry.buffer = address_add(cpu, semantics, entry.rs2_value, imm),
        Opcode::Bz | Opcode::Bnz | Opcode::Jump => evaluate_control(cpu, semantics, &mut entry),
        Opcode::Halt => {
            debug!(pc = entry.pc, "HALT in Execute, draining Fetch and Decode");
            cpu.draining = true;
        }
        Opcode::Nop => {}
    }

    cpu.shadow.memory = Latch::occupied(entry);
    Ok(())
}

/// Publishes the result of the instruction now in Memory.
///
/// Loads are excluded: their value is only known after Memory.
fn forward_from_memory(cpu: &mut Cpu) {
    if !cpu.pipeline.forwarding {
        return;
    }
    if let Some(entry) = cpu.latches.memory.entry {
        if entry.inst.opcode.forwards_from_execute() {
            cpu.scoreboard.forward(entry.inst.rd, entry.buffer);
        }
    }
}

/// Drops a flushed instruction, returning any register it had claimed.
fn discard(cpu: &mut Cpu, entry: &LatchEntry) {
    debug!(pc = entry.pc, "flushing {} from Execute", entry.inst);
    if let Some(rd) = entry.inst.dest() {
        cpu.scoreboard.cancel(rd);
    }
    if entry.inst.opcode == Opcode::Mul {
        cpu.mul.cancel();
    }
    cpu.stats.flushes += 1;
}

fn alu_rr(cpu: &mut Cpu, entry: &mut LatchEntry, op: AluOp) {
    entry.buffer = cpu.alu.execute(op, entry.rs1_value, entry.rs2_value);
}

/// Address and target adders. Legacy resolution routes them through the
/// flag-setting ALU.
fn address_add(cpu: &mut Cpu, semantics: BranchSemantics, base: Word, imm: Word) -> Word {
    match semantics {
        BranchSemantics::Architectural => Alu::compute(AluOp::Add, base, imm),
        BranchSemantics::Legacy => cpu.alu.execute(AluOp::Add, base, imm),
    }
}

fn evaluate_control(cpu: &mut Cpu, semantics: BranchSemantics, entry: &mut LatchEntry) {
    let zero = cpu.alu.zero_flag();
    let (taken, base) = match (entry.inst.opcode, semantics) {
        (Opcode::Bz, _) => (zero, entry.pc),
        (Opcode::Bnz, _) => (!zero, entry.pc),
        (Opcode::Jump, BranchSemantics::Architectural) => (true, entry.rs1_value),
        (Opcode::Jump, BranchSemantics::Legacy) => (!zero, entry.rs1_value),
        _ => return,
    };

    entry.taken = taken;
    match semantics {
        BranchSemantics::Architectural => {
            entry.buffer = Alu::compute(AluOp::Add, base, entry.inst.imm);
        }
        BranchSemantics::Legacy if taken => {
            entry.buffer = cpu.alu.execute(AluOp::Add, base, entry.inst.imm);
        }
        BranchSemantics::Legacy => {}
    }

    if taken {
        debug!(pc = entry.pc, target = entry.buffer, "{} taken in Execute", entry.inst.opcode);
        cpu.signals.fetch_hold = true;
    }
}

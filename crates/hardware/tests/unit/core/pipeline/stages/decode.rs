//! Decode Stage Unit Tests.
//!
//! Verifies that `decode_stage` correctly performs:
//!   1. Operand reads (forwarded values first) and destination claims at issue
//!   2. RAW and WAW stalls
//!   3. Structural holds behind a multiply
//!   4. The conditional-branch wait behind arithmetic instructions
//!   5. Register validation, draining and empty-latch acceptance

use crate::common::builder::EntryBuilder;
use crate::common::harness::{TestContext, next_cycle};
use apex_core::common::SimError;
use apex_core::core::Cpu;
use apex_core::core::pipeline::hazards::BranchWait;
use apex_core::core::pipeline::latches::Latch;
use apex_core::core::pipeline::scoreboard::RegState;
use apex_core::core::pipeline::stages::decode_stage;
use apex_core::isa::{Instruction, Opcode};
use pretty_assertions::assert_eq;

fn cpu() -> Cpu {
    let mut cpu = TestContext::cpu_for(vec![Instruction::nop(); 8]);
    cpu.regs.write(2, 3).unwrap();
    cpu.regs.write(3, 4).unwrap();
    cpu
}

fn add() -> Latch {
    EntryBuilder::new(Instruction::alu(Opcode::Add, 1, 2, 3)).latch()
}

#[test]
fn test_issue_reads_operands_and_claims_destination() {
    let mut cpu = cpu();
    cpu.latches.decode = add();

    decode_stage(&mut cpu).unwrap();

    let issued = cpu.shadow.execute.entry.unwrap();
    assert_eq!((issued.rs1_value, issued.rs2_value), (3, 4));
    assert_eq!(cpu.scoreboard.state(1), RegState::Pending);
    assert!(cpu.signals.decode_accepts);
    assert!(cpu.shadow.decode.entry.is_none());
}

#[test]
fn test_forwarded_value_beats_register_file() {
    let mut cpu = cpu();
    cpu.scoreboard.claim(2);
    cpu.scoreboard.forward(2, 11);
    cpu.latches.decode = add();

    decode_stage(&mut cpu).unwrap();

    assert_eq!(cpu.shadow.execute.entry.unwrap().rs1_value, 11);
}

#[test]
fn test_pending_source_stalls() {
    let mut cpu = cpu();
    cpu.scoreboard.claim(3);
    cpu.latches.decode = add();

    decode_stage(&mut cpu).unwrap();

    assert!(cpu.shadow.execute.entry.is_none());
    assert!(cpu.shadow.decode.stalled);
    assert!(!cpu.signals.decode_accepts);
    assert_eq!(cpu.stats.stalls_data, 1);
    assert_eq!(cpu.scoreboard.state(1), RegState::Valid);
}

#[test]
fn test_pending_destination_stalls_movc() {
    let mut cpu = cpu();
    cpu.scoreboard.claim(1);
    cpu.latches.decode = EntryBuilder::new(Instruction::movc(1, 5)).latch();

    decode_stage(&mut cpu).unwrap();

    assert!(cpu.shadow.execute.entry.is_none());
    assert_eq!(cpu.stats.stalls_data, 1);
}

#[test]
fn test_store_needs_both_sources() {
    let mut cpu = cpu();
    cpu.scoreboard.claim(2);
    cpu.latches.decode = EntryBuilder::new(Instruction::store(3, 2, 0)).latch();
    decode_stage(&mut cpu).unwrap();
    assert!(cpu.shadow.execute.entry.is_none());
}

#[test]
fn test_multiply_in_execute_holds_decode() {
    let mut cpu = cpu();
    cpu.signals.execute_busy = true;
    cpu.latches.decode = add();

    decode_stage(&mut cpu).unwrap();

    let held = cpu.shadow.decode.entry.unwrap();
    assert_eq!(held.rs1_value, 3);
    assert!(cpu.shadow.execute.entry.is_none());
    assert!(!cpu.signals.decode_accepts);
    assert_eq!(cpu.stats.stalls_structural, 1);
    assert_eq!(cpu.scoreboard.state(1), RegState::Valid);
}

#[test]
fn test_branch_waits_behind_arithmetic() {
    let mut cpu = cpu();
    let sub = EntryBuilder::new(Instruction::alu(Opcode::Sub, 1, 2, 3)).latch();
    cpu.latches.decode = EntryBuilder::new(Instruction::bz(8)).pc(4004).latch();
    cpu.latches.execute = sub;

    decode_stage(&mut cpu).unwrap();
    assert_eq!(cpu.branch_wait, BranchWait::Waiting(1));
    assert!(cpu.shadow.execute.entry.is_none());

    next_cycle(&mut cpu);
    decode_stage(&mut cpu).unwrap();
    assert_eq!(cpu.branch_wait, BranchWait::Waiting(2));
    assert!(cpu.shadow.execute.entry.is_none());

    next_cycle(&mut cpu);
    decode_stage(&mut cpu).unwrap();
    assert_eq!(cpu.branch_wait, BranchWait::NotWaiting);
    assert_eq!(cpu.shadow.execute.entry.unwrap().pc, 4004);
    assert_eq!(cpu.stats.stalls_control, 2);
}

#[test]
fn test_branch_behind_logic_issues_at_once() {
    let mut cpu = cpu();
    cpu.latches.execute = EntryBuilder::new(Instruction::alu(Opcode::And, 1, 2, 3)).latch();
    cpu.latches.decode = EntryBuilder::new(Instruction::bnz(8)).latch();

    decode_stage(&mut cpu).unwrap();

    assert!(cpu.shadow.execute.entry.is_some());
    assert_eq!(cpu.stats.stalls_control, 0);
}

#[test]
fn test_single_cycle_wait_never_delays() {
    let mut cpu = cpu();
    cpu.pipeline.branch_wait_cycles = 1;
    cpu.latches.execute = EntryBuilder::new(Instruction::alu(Opcode::Mul, 1, 2, 3)).latch();
    cpu.latches.decode = EntryBuilder::new(Instruction::bz(8)).latch();

    decode_stage(&mut cpu).unwrap();

    assert!(cpu.shadow.execute.entry.is_some());
}

#[test]
fn test_jump_does_not_wait() {
    let mut cpu = cpu();
    cpu.latches.execute = EntryBuilder::new(Instruction::alu(Opcode::Add, 1, 2, 3)).latch();
    cpu.latches.decode = EntryBuilder::new(Instruction::jump(2, 0)).latch();

    decode_stage(&mut cpu).unwrap();

    assert_eq!(cpu.shadow.execute.entry.unwrap().rs1_value, 3);
}

#[test]
fn test_register_out_of_range() {
    let mut cpu = cpu();
    cpu.latches.decode = EntryBuilder::new(Instruction::alu(Opcode::Add, 1, 40, 3)).latch();
    assert!(matches!(
        decode_stage(&mut cpu),
        Err(SimError::OperandOutOfRange { value: 40, .. })
    ));
}

#[test]
fn test_unused_fields_are_not_validated() {
    let mut cpu = cpu();
    cpu.latches.decode = EntryBuilder::new(Instruction::new(Opcode::Movc, 1, 40, 99, 5)).latch();
    decode_stage(&mut cpu).unwrap();
    assert!(cpu.shadow.execute.entry.is_some());
}

#[test]
fn test_draining_discards() {
    let mut cpu = cpu();
    cpu.draining = true;
    cpu.branch_wait = BranchWait::Waiting(1);
    cpu.latches.decode = add();

    decode_stage(&mut cpu).unwrap();

    assert!(cpu.shadow.execute.entry.is_none());
    assert!(cpu.shadow.decode.entry.is_none());
    assert_eq!(cpu.branch_wait, BranchWait::NotWaiting);
    assert_eq!(cpu.stats.flushes, 1);
}

#[test]
fn test_flush_decode_discards_without_claim() {
    let mut cpu = cpu();
    cpu.signals.flush_decode = true;
    cpu.latches.decode = add();
    decode_stage(&mut cpu).unwrap();
    assert!(cpu.scoreboard.is_valid(1));
    assert!(cpu.shadow.execute.entry.is_none());
}

#[test]
fn test_empty_latch_accepts() {
    let mut cpu = cpu();
    decode_stage(&mut cpu).unwrap();
    assert!(cpu.signals.decode_accepts);
    assert!(cpu.shadow.execute.entry.is_none());
}

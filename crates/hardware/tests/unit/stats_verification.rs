//! SimStats unit tests.
//!
//! Verifies default initialization, retirement bookkeeping, derived metrics
//! and the report, plus the counters a real run produces.

use crate::common::builder::asm;
use crate::common::harness::TestContext;
use apex_core::isa::Opcode;
use apex_core::sim::Termination;
use apex_core::stats::SimStats;

#[test]
fn default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.inst_alu, 0);
    assert_eq!(stats.inst_load, 0);
    assert_eq!(stats.inst_store, 0);
    assert_eq!(stats.inst_branch, 0);
    assert_eq!(stats.stalls_data, 0);
    assert_eq!(stats.stalls_structural, 0);
    assert_eq!(stats.stalls_control, 0);
    assert_eq!(stats.branches_taken, 0);
    assert_eq!(stats.flushes, 0);
}

#[test]
fn retire_mix() {
    let mut stats = SimStats::default();
    for op in [
        Opcode::Movc,
        Opcode::Mul,
        Opcode::Load,
        Opcode::Store,
        Opcode::Jump,
        Opcode::Halt,
        Opcode::Nop,
    ] {
        stats.record_retire(op);
    }
    assert_eq!(stats.instructions_retired, 7);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 1);
}

#[test]
fn cpi_calculation() {
    let mut stats = SimStats::default();
    assert!(stats.cpi().abs() < f64::EPSILON);
    stats.cycles = 300;
    stats.instructions_retired = 100;
    assert!((stats.cpi() - 3.0).abs() < 1e-9);
}

#[test]
fn report_contains_sections() {
    let mut stats = SimStats::default();
    stats.cycles = 10;
    stats.branches_taken = 2;
    let report = stats.to_string();
    assert!(report.contains("sim_cycles               10"));
    assert!(report.contains("INSTRUCTION MIX"));
    assert!(report.contains("STALLS"));
    assert!(report.contains("  branch.taken           2"));
}

#[test]
fn run_counts_cycles_and_retirements() {
    let mut tc = TestContext::new(asm("MOVC R1,#2\nMUL R2,R1,R1\nSTORE R2,R31,#0\nHALT\n"));
    assert_eq!(tc.run(100), Termination::CompletedNormally);
    let stats = tc.sim.stats();
    assert_eq!(stats.cycles, tc.sim.cycles());
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.multiplies, 1);
    assert!(stats.stalls_structural > 0);
}

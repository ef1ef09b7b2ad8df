//! Data Hazard Tests: Stalls and Early Forwarding.
//!
//! Runs short dependent sequences through the full pipeline and checks
//! when the dependent instruction reaches Writeback, the stall counters,
//! and the committed results with forwarding on and off.

use crate::common::builder::asm;
use crate::common::harness::TestContext;
use apex_core::config::Config;
use apex_core::core::pipeline::latches::Stage;
use apex_core::sim::Termination;
use pretty_assertions::assert_eq;

fn no_forwarding() -> Config {
    let mut config = Config::default();
    config.pipeline.forwarding = false;
    config
}

fn dependent(config: &Config) -> TestContext {
    let mut tc = TestContext::with_config(
        asm("ADD R1,R2,R3\nSUB R4,R1,R5\nHALT\n"),
        config,
    );
    tc.set_reg(2, 3);
    tc.set_reg(3, 4);
    tc.set_reg(5, 1);
    tc
}

#[test]
fn raw_dependency_costs_one_cycle_with_forwarding() {
    let mut tc = dependent(&Config::default());
    tc.run_recording(50);

    assert_eq!(tc.first_seen(Stage::Writeback, 4004), Some(5));
    assert_eq!(tc.get_reg(4), 6);
    assert_eq!(tc.sim.cycles(), 8);
    assert_eq!(tc.sim.stats().stalls_data, 1);
}

#[test]
fn independent_instruction_flows_without_stall() {
    let mut tc = TestContext::new(asm("ADD R1,R2,R3\nSUB R4,R6,R5\nHALT\n"));
    tc.set_reg(6, 7);
    tc.set_reg(5, 1);
    tc.run_recording(50);

    assert_eq!(tc.first_seen(Stage::Writeback, 4004), Some(4));
    assert_eq!(tc.get_reg(4), 6);
    assert_eq!(tc.sim.stats().stalls_data, 0);
}

#[test]
fn raw_dependency_without_forwarding_waits_for_writeback() {
    let mut tc = dependent(&no_forwarding());
    tc.run_recording(50);

    assert_eq!(tc.first_seen(Stage::Writeback, 4004), Some(6));
    assert_eq!(tc.get_reg(4), 6);
    assert_eq!(tc.sim.cycles(), 9);
    assert_eq!(tc.sim.stats().stalls_data, 2);
}

#[test]
fn dependent_reads_the_new_value() {
    // Each instruction consumes the previous result.
    let mut tc = TestContext::new(asm(
        "MOVC R1,#2\nADD R2,R1,R1\nADD R3,R2,R1\nSUB R4,R3,R2\nHALT\n",
    ));
    assert_eq!(tc.run(100), Termination::CompletedNormally);
    assert_eq!(tc.get_reg(2), 4);
    assert_eq!(tc.get_reg(3), 6);
    assert_eq!(tc.get_reg(4), 2);
}

#[test]
fn load_result_is_not_forwarded_early() {
    let program = asm("MOVC R1,#7\nSTORE R1,R31,#0\nLOAD R2,R31,#0\nADD R3,R2,R2\nHALT\n");
    let mut tc = TestContext::new(program);
    tc.run_recording(100);

    assert_eq!(tc.get_reg(3), 14);
    // ADD may only leave Decode once the LOAD has committed.
    let load_wb = tc.first_seen(Stage::Writeback, 4008).unwrap();
    let add_ex = tc.first_seen(Stage::Execute, 4012).unwrap();
    assert!(add_ex > load_wb);
}

#[test]
fn write_after_write_keeps_program_order() {
    let mut tc = TestContext::new(asm("MOVC R1,#1\nMOVC R1,#2\nHALT\n"));
    assert_eq!(tc.run(50), Termination::CompletedNormally);
    assert_eq!(tc.get_reg(1), 2);
    assert!(tc.is_valid(1));
}

#[test]
fn registers_valid_after_completion() {
    let mut tc = dependent(&Config::default());
    assert_eq!(tc.run(50), Termination::CompletedNormally);
    assert!((0..32).all(|r| tc.is_valid(r)));
}

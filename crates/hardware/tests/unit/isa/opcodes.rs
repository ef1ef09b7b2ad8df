//! Opcode parsing and classification tests.

use apex_core::common::SimError;
use apex_core::isa::{Instruction, Opcode};
use rstest::rstest;

#[test]
fn every_mnemonic_parses_back() {
    for op in Opcode::ALL {
        assert_eq!(op.mnemonic().parse::<Opcode>().unwrap(), op);
    }
}

#[rstest]
#[case("movc", Opcode::Movc)]
#[case(" Halt ", Opcode::Halt)]
#[case("XOR", Opcode::Xor)]
fn mnemonics_are_case_insensitive(#[case] text: &str, #[case] op: Opcode) {
    assert_eq!(text.parse::<Opcode>().unwrap(), op);
}

#[rstest]
#[case("DIV")]
#[case("ADDI")]
#[case("")]
fn unknown_mnemonics_rejected(#[case] text: &str) {
    assert!(matches!(
        text.parse::<Opcode>(),
        Err(SimError::UnsupportedOpcode(_))
    ));
}

#[test]
fn only_load_waits_for_memory() {
    for op in Opcode::ALL {
        let expected = op.writes_register() && op != Opcode::Load;
        assert_eq!(op.forwards_from_execute(), expected, "{op}");
    }
}

#[test]
fn branch_delay_classification() {
    let delaying: Vec<_> = Opcode::ALL.into_iter().filter(|op| op.delays_branch()).collect();
    assert_eq!(delaying, vec![Opcode::Add, Opcode::Sub, Opcode::Mul]);
    assert!(!Opcode::Jump.is_conditional_branch());
}

#[rstest]
#[case(Instruction::alu(Opcode::Add, 1, 2, 3), vec![2, 3, 1])]
#[case(Instruction::load(4, 5, 0), vec![5, 4])]
#[case(Instruction::jump(6, 0), vec![6])]
#[case(Instruction::bnz(8), vec![])]
#[case(Instruction::halt(), vec![])]
fn used_registers(#[case] inst: Instruction, #[case] expected: Vec<usize>) {
    assert_eq!(inst.used_registers().collect::<Vec<_>>(), expected);
}

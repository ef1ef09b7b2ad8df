//! Simulator test harness.

use apex_core::common::Word;
use apex_core::config::Config;
use apex_core::core::Cpu;
use apex_core::core::pipeline::latches::{PipelineLatches, Stage};
use apex_core::core::pipeline::signals::Signals;
use apex_core::isa::Instruction;
use apex_core::sim::{RunMode, Simulator, Termination};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; `RUST_LOG=debug` shows stage decisions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext {
    pub sim: Simulator,
    /// Latches after each recorded cycle; `history[n]` is the state after cycle `n + 1`.
    pub history: Vec<PipelineLatches>,
}

impl TestContext {
    pub fn new(program: Vec<Instruction>) -> Self {
        Self::with_config(program, &Config::default())
    }

    pub fn with_config(program: Vec<Instruction>, config: &Config) -> Self {
        init_tracing();
        let sim = Simulator::new(program, config).expect("test program must initialize");
        Self {
            sim,
            history: Vec::new(),
        }
    }

    /// A bare CPU for driving individual stages.
    pub fn cpu_for(program: Vec<Instruction>) -> Cpu {
        init_tracing();
        Cpu::new(program, &Config::default()).expect("test program must initialize")
    }

    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: Word) {
        self.sim.set_register(reg, val).expect("valid register");
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> Word {
        self.sim.registers().values[reg]
    }

    pub fn is_valid(&self, reg: usize) -> bool {
        self.sim.registers().valid[reg]
    }

    /// Runs silently to completion within `max_cycles`.
    pub fn run(&mut self, max_cycles: u64) -> Termination {
        self.sim
            .run(RunMode::Silent, max_cycles)
            .expect("run must not fail")
    }

    /// Steps cycle by cycle until the program stops or `max_cycles` elapse,
    /// recording the latches after each cycle.
    pub fn run_recording(&mut self, max_cycles: u64) {
        for _ in 0..max_cycles {
            if self.sim.is_stopped() {
                break;
            }
            self.sim.step().expect("step must not fail");
            self.history.push(*self.sim.latches());
        }
    }

    /// First recorded cycle index at which `stage` held the instruction at `pc`.
    pub fn first_seen(&self, stage: Stage, pc: Word) -> Option<usize> {
        self.history
            .iter()
            .position(|l| l.get(stage).entry.is_some_and(|e| e.pc == pc))
    }

    /// Every recorded cycle index at which `stage` held the instruction at `pc`.
    pub fn cycles_in(&self, stage: Stage, pc: Word) -> Vec<usize> {
        self.history
            .iter()
            .enumerate()
            .filter(|(_, l)| l.get(stage).entry.is_some_and(|e| e.pc == pc))
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the instruction at `pc` ever reached `stage`.
    pub fn ever_in(&self, stage: Stage, pc: Word) -> bool {
        self.first_seen(stage, pc).is_some()
    }
}

/// Moves a hand-driven CPU to the next cycle: the shadow latches become
/// current and the per-cycle signals are cleared.
pub fn next_cycle(cpu: &mut Cpu) {
    cpu.latches = cpu.shadow;
    cpu.shadow = PipelineLatches::default();
    cpu.signals = Signals::default();
}

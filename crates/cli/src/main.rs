//! APEX pipeline simulator CLI.
//!
//! This binary loads an APEX assembly program and runs it through the
//! five-stage pipeline. It performs:
//! 1. **Simulate:** Run quietly for at most the given number of cycles.
//! 2. **Display:** Additionally print every stage's contents each cycle.
//! 3. **Dump:** Print the register file (with validity) and the first 100
//!    data-memory words once the run ends.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use apex_core::common::SimResult;
use apex_core::config::Config;
use apex_core::sim::{RunMode, Simulator, Termination, load_program};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run without per-cycle output.
    Simulate,
    /// Print each stage's contents every cycle.
    Display,
}

#[derive(Parser, Debug)]
#[command(
    name = "apex-sim",
    author,
    version,
    about = "Cycle-accurate APEX five-stage pipeline simulator",
    long_about = "Run an APEX assembly program through the in-order five-stage pipeline.\n\nExamples:\n  apex-sim input.asm simulate 50\n  apex-sim input.asm display 20 --stats\n  RUST_LOG=debug apex-sim input.asm simulate 100 --config apex.json"
)]
struct Cli {
    /// Program file (one instruction per line, e.g. `MOVC,R1,#5`).
    program: PathBuf,

    /// `simulate` runs quietly; `display` traces every stage each cycle.
    mode: Mode,

    /// Cycle budget. Defaults to `general.max_cycles` from the configuration.
    cycles: Option<u64>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print performance statistics after the run.
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.mode == Mode::Display { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("apex-sim: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> SimResult<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let program = load_program(&cli.program)?;
    let mut sim = Simulator::new(program, &config)?;

    let mode = match cli.mode {
        Mode::Display => RunMode::Trace,
        Mode::Simulate if config.general.trace => RunMode::Trace,
        Mode::Simulate => RunMode::Silent,
    };
    let budget = cli.cycles.unwrap_or(config.general.max_cycles);
    let outcome = sim.run(mode, budget)?;

    match outcome {
        Termination::CompletedNormally => println!(
            "(apex) >> Simulation Complete after {} cycles",
            sim.cycles()
        ),
        Termination::CycleBudgetExceeded => println!(
            "(apex) >> Cycle budget of {budget} exhausted before the program finished"
        ),
    }

    print_registers(&sim);
    print_memory(&sim);
    if cli.stats {
        println!();
        sim.stats().print();
    }
    Ok(())
}

fn print_registers(sim: &Simulator) {
    let regs = sim.registers();
    println!("=============== STATE OF ARCHITECTURAL REGISTER FILE ==========");
    for (idx, (value, valid)) in regs.values.iter().zip(regs.valid).enumerate() {
        let status = if valid { "Valid" } else { "Invalid" };
        println!("|\tREG[{idx:02}]\t|\tValue = {value:<10}\t|\tStatus = {status}\t|");
    }
}

fn print_memory(sim: &Simulator) {
    println!();
    println!("============== STATE OF DATA MEMORY =============");
    for (idx, value) in sim.memory_prefix().iter().enumerate() {
        println!("|\tMEM[{idx:02}]\t|\tData Value = {value}\t|");
    }
}

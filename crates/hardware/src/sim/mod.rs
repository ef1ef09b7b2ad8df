//! Simulation front end.
//!
//! Provides the program loader and the [`Simulator`] that runs a loaded
//! program through the pipeline.

/// Assembly text loader.
pub mod loader;

/// Run control and state accessors.
pub mod simulator;

pub use loader::{load_program, parse_program};
pub use simulator::{RegisterSnapshot, RunMode, Simulator, Termination};

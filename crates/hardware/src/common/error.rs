//! Simulator error definitions.
//!
//! Every failure the core can report is a variant of [`SimError`]. Errors are
//! local to a run: the stage that detects one returns it, the run aborts,
//! and the register file and data memory keep whatever was last committed.

use thiserror::Error;

/// Errors reported by the loader, the configuration layer and the pipeline.
#[derive(Debug, Error)]
pub enum SimError {
    /// The simulator could not be constructed (no program, empty program, bad config).
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A mnemonic that is not part of the APEX instruction set.
    #[error("unsupported opcode `{0}`")]
    UnsupportedOpcode(String),

    /// A register index outside `0..32` or a data address outside data memory.
    #[error("{what} out of range: {value}")]
    OperandOutOfRange {
        /// Which operand was rejected ("register", "data address", ...).
        what: &'static str,
        /// The offending value.
        value: i64,
    },

    /// A data memory access that is not word aligned.
    #[error("misaligned data address {0}")]
    MisalignedAddress(i32),

    /// A program line that could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based source line number.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Reading a program or configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl SimError {
    /// Shorthand for an out-of-range register index.
    pub const fn register(index: usize) -> Self {
        Self::OperandOutOfRange {
            what: "register",
            value: index as i64,
        }
    }

    /// Shorthand for an out-of-range data address.
    pub const fn address(addr: i32) -> Self {
        Self::OperandOutOfRange {
            what: "data address",
            value: addr as i64,
        }
    }

    /// A redirect target that names no instruction in the program.
    pub const fn instruction_address(addr: i32) -> Self {
        Self::OperandOutOfRange {
            what: "instruction address",
            value: addr as i64,
        }
    }
}

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

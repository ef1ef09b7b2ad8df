//! Configuration system for the APEX simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants (cycle budget, memory size, branch wait).
//! 2. **Structures:** Hierarchical config for general, pipeline, and memory settings.
//! 3. **Enums:** Branch resolution semantics.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with
//! `Config::default()`. Every field is optional in JSON.

use serde::Deserialize;

use crate::common::constants::BRANCH_WAIT_CYCLES;
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle budget used when the caller does not supply one.
    pub const MAX_CYCLES: u64 = 10_000;

    /// Data memory size in words (byte addresses `0..16000`).
    pub const DATA_WORDS: usize = 4000;
}

/// How conditional branches and jumps are resolved.
///
/// `Legacy` checks the zero flag with a different sense in Execute and in
/// Memory, and lets address and target adds overwrite the flag. It exists for
/// cycle-for-cycle comparison with older APEX simulators; the default
/// resolves control flow architecturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchSemantics {
    /// `BZ` taken iff the zero flag is set, `BNZ` iff it is clear, `JUMP`
    /// always. Decided once in Execute; address adders leave the flag alone.
    #[default]
    Architectural,
    /// Execute takes `BZ` on zero and `BNZ`/`JUMP` on not zero; Memory
    /// redirects any control instruction while the flag is clear.
    Legacy,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use apex_core::config::{BranchSemantics, Config};
///
/// let config = Config::default();
/// assert!(!config.general.trace);
/// assert_eq!(config.memory.data_words, 4000);
///
/// let config = Config::from_json(
///     r#"{ "pipeline": { "branch_semantics": "Legacy", "forwarding": false } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.pipeline.branch_semantics, BranchSemantics::Legacy);
/// assert!(!config.pipeline.forwarding);
/// assert_eq!(config.pipeline.branch_wait_cycles, 3);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline behaviour.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Data memory configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the document is malformed, or
    /// [`SimError::Initialization`] if a value is unusable.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Initialization`] describing the first bad value.
    pub fn validate(&self) -> SimResult<()> {
        if self.memory.data_words == 0 {
            return Err(SimError::Initialization(
                "memory.data_words must be non-zero".into(),
            ));
        }
        if self.memory.data_words > (i32::MAX / 4) as usize {
            return Err(SimError::Initialization(format!(
                "memory.data_words {} exceeds the 32-bit address space",
                self.memory.data_words
            )));
        }
        if self.pipeline.branch_wait_cycles == 0 {
            return Err(SimError::Initialization(
                "pipeline.branch_wait_cycles must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-cycle stage contents (the CLI's "display" mode).
    #[serde(default)]
    pub trace: bool,

    /// Cycle budget used when the caller does not pass one.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Pipeline behaviour switches.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Release a result's register one cycle before Writeback commits it,
    /// letting Decode read the value straight from the Memory latch.
    #[serde(default = "PipelineConfig::default_forwarding")]
    pub forwarding: bool,

    /// Branch and jump resolution semantics.
    #[serde(default)]
    pub branch_semantics: BranchSemantics,

    /// Decode cycles a conditional branch spends behind an arithmetic
    /// instruction in Execute, counting the cycle in which it issues.
    #[serde(default = "PipelineConfig::default_branch_wait_cycles")]
    pub branch_wait_cycles: u8,
}

impl PipelineConfig {
    const fn default_forwarding() -> bool {
        true
    }

    const fn default_branch_wait_cycles() -> u8 {
        BRANCH_WAIT_CYCLES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forwarding: true,
            branch_semantics: BranchSemantics::default(),
            branch_wait_cycles: BRANCH_WAIT_CYCLES,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of words of data memory.
    #[serde(default = "MemoryConfig::default_data_words")]
    pub data_words: usize,
}

impl MemoryConfig {
    const fn default_data_words() -> usize {
        defaults::DATA_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: defaults::DATA_WORDS,
        }
    }
}

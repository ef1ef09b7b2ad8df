//! System-wide constants.
//!
//! Addresses and sizes that are fixed by the APEX architecture rather than
//! configurable through [`Config`](crate::config::Config).

/// Address of the first instruction in code memory.
pub const CODE_BASE_ADDRESS: i32 = 4000;

/// Width of every instruction in address units.
pub const INSTRUCTION_SIZE: i32 = 4;

/// Number of architectural general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Width of a data memory word in address units.
pub const WORD_SIZE: i32 = 4;

/// Number of leading data-memory words exposed by the post-run dump.
pub const MEMORY_DUMP_WORDS: usize = 100;

/// Default number of Decode cycles a conditional branch spends waiting for
/// an arithmetic instruction ahead of it to settle the zero flag.
pub const BRANCH_WAIT_CYCLES: u8 = 3;

//! Data Memory.
//!
//! A flat array of words addressed by byte address. Addresses must be
//! non-negative multiples of [`WORD_SIZE`] below `WORD_SIZE * len`; anything
//! else is reported as an error instead of being accessed.

use crate::common::constants::{MEMORY_DUMP_WORDS, WORD_SIZE};
use crate::common::error::{SimError, SimResult};
use crate::common::reg::Word;

/// Word-addressable data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<Word>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `words` words.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    fn index(&self, addr: Word) -> SimResult<usize> {
        if addr < 0 {
            return Err(SimError::address(addr));
        }
        if addr % WORD_SIZE != 0 {
            return Err(SimError::MisalignedAddress(addr));
        }
        let idx = (addr / WORD_SIZE) as usize;
        if idx >= self.words.len() {
            return Err(SimError::address(addr));
        }
        Ok(idx)
    }

    /// Reads the word at byte address `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::MisalignedAddress`] or [`SimError::OperandOutOfRange`].
    pub fn read(&self, addr: Word) -> SimResult<Word> {
        let idx = self.index(addr)?;
        Ok(self.words[idx])
    }

    /// Writes `val` at byte address `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::MisalignedAddress`] or [`SimError::OperandOutOfRange`].
    pub fn write(&mut self, addr: Word, val: Word) -> SimResult<()> {
        let idx = self.index(addr)?;
        self.words[idx] = val;
        Ok(())
    }

    /// Every word, indexed by `address / 4`.
    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    /// The leading words shown in the post-run dump.
    pub fn prefix(&self) -> &[Word] {
        &self.words[..MEMORY_DUMP_WORDS.min(self.words.len())]
    }

    /// Size in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the memory has no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

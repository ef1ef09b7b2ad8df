//! Multi-cycle multiply unit.
//!
//! A multiply occupies Execute for two cycles and is followed by
//! one catch-up cycle in which Decode refills Execute. The unit is a small
//! state machine; each state names the cycle that completed on the previous
//! tick:
//!
//! | state            | this tick                                        | next             |
//! |------------------|--------------------------------------------------|------------------|
//! | `Idle`           | a multiply in Execute computes its product       | `MultiplyCycle1` |
//! | `MultiplyCycle1` | the product moves to Memory, Execute empties     | `MultiplyCycle2` |
//! | `MultiplyCycle2` | Decode issues into Execute again                 | `Idle`           |

use tracing::debug;

/// Sub-state of the Execute stage's multiply path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MulState {
    /// No multiply in progress.
    #[default]
    Idle,
    /// The product was computed last tick; the multiply still holds Execute.
    MultiplyCycle1,
    /// The multiply left Execute last tick; the pipeline catches up this tick.
    MultiplyCycle2,
}

/// Multiply unit bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Multiplier {
    state: MulState,
    issued: u64,
}

impl Multiplier {
    /// Creates an idle multiplier.
    pub const fn new() -> Self {
        Self {
            state: MulState::Idle,
            issued: 0,
        }
    }

    /// Current state.
    pub const fn state(&self) -> MulState {
        self.state
    }

    /// Number of multiplies started since reset.
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// Records the first cycle of a new multiply. Only valid from `Idle`.
    pub fn start(&mut self) {
        debug_assert_eq!(self.state, MulState::Idle);
        self.issued += 1;
        self.state = MulState::MultiplyCycle1;
        debug!(issued = self.issued, "multiply cycle 1");
    }

    /// Moves the unit one tick forward along its transition table and
    /// returns the state that was current at the start of the tick.
    pub fn advance(&mut self) -> MulState {
        let current = self.state;
        self.state = match current {
            MulState::Idle => MulState::Idle,
            MulState::MultiplyCycle1 => {
                debug!("multiply cycle 2");
                MulState::MultiplyCycle2
            }
            MulState::MultiplyCycle2 => MulState::Idle,
        };
        current
    }

    /// Abandons any multiply in flight (the instruction was flushed).
    pub fn cancel(&mut self) {
        self.state = MulState::Idle;
    }
}

//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It handles:
//! 1. **Delivery:** Fetches the instruction at the PC into Decode and advances the PC.
//! 2. **Prefetch:** While Decode is stalled, fetches one instruction ahead into its
//!    own latch and redelivers it once Decode frees up, without fetching again.
//! 3. **Redirect:** Restarts at a branch target, discarding any prefetched instruction.
//! 4. **Hold and Drain:** Stops delivering behind a taken branch and after `HALT`.

use tracing::debug;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, LatchEntry, Stage};

/// Whether Fetch holds an instruction that Decode has not received yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing held; the next delivery fetches at the PC.
    #[default]
    Normal,
    /// The Fetch latch holds a prefetched instruction; the PC is already past it.
    HoldingPrefetch,
}

/// Executes the fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - Fetching at a PC outside the program yields a bubble and leaves the PC alone
/// - A prefetch happens at most once per Decode stall
pub fn fetch_stage(cpu: &mut Cpu) {
    let held = cpu.latches.fetch;

    if cpu.draining || cpu.signals.flush_all {
        if held.entry.is_some() {
            cpu.stats.flushes += 1;
        }
        cpu.fetch_state = FetchState::Normal;
        cpu.trace_stage(Stage::Fetch, None);
        return;
    }

    if let Some(target) = cpu.signals.redirect {
        if let Some(entry) = held.entry {
            debug!(pc = entry.pc, "discarding prefetched {}", entry.inst);
            cpu.stats.flushes += 1;
        }
        cpu.fetch_state = FetchState::Normal;
        cpu.pc = target;
        deliver_next(cpu);
        return;
    }

    if cpu.signals.fetch_hold {
        cpu.stats.stalls_control += 1;
        cpu.shadow.fetch = held;
        cpu.trace_stage(Stage::Fetch, held.entry.as_ref());
        return;
    }

    match (cpu.signals.decode_accepts, cpu.fetch_state) {
        (true, FetchState::HoldingPrefetch) => {
            cpu.fetch_state = FetchState::Normal;
            cpu.trace_stage(Stage::Fetch, held.entry.as_ref());
            if let Some(entry) = held.entry {
                cpu.shadow.decode = Latch::occupied(entry);
            }
        }
        (true, FetchState::Normal) => deliver_next(cpu),
        (false, FetchState::Normal) => {
            let fetched = fetch_next(cpu);
            cpu.trace_stage(Stage::Fetch, fetched.as_ref());
            if let Some(entry) = fetched {
                debug!(pc = entry.pc, "prefetching {}", entry.inst);
                cpu.stats.prefetches += 1;
                cpu.shadow.fetch = Latch::held(entry);
                cpu.fetch_state = FetchState::HoldingPrefetch;
            }
        }
        (false, FetchState::HoldingPrefetch) => {
            cpu.shadow.fetch = held;
            cpu.trace_stage(Stage::Fetch, held.entry.as_ref());
        }
    }
}

fn deliver_next(cpu: &mut Cpu) {
    let fetched = fetch_next(cpu);
    cpu.trace_stage(Stage::Fetch, fetched.as_ref());
    if let Some(entry) = fetched {
        cpu.shadow.decode = Latch::occupied(entry);
    }
}

/// Reads the instruction at the PC and advances the PC past it.
fn fetch_next(cpu: &mut Cpu) -> Option<LatchEntry> {
    let inst = cpu.instruction_at(cpu.pc)?;
    let entry = LatchEntry::fetched(cpu.pc, inst);
    cpu.pc = cpu.pc.wrapping_add(INSTRUCTION_SIZE);
    Some(entry)
}

//! Pipeline Latch Interface.
//!
//! This module defines the occupancy check every inter-stage buffer supports.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the instruction currently occupying a stage.
pub trait PipelineLatch {
    /// Checks if the latch holds a bubble.
    ///
    /// # Returns
    ///
    /// `true` if there is no instruction in the latch, `false` otherwise.
    fn is_empty(&self) -> bool;
}

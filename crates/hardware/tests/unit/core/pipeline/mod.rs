/// Whole-pipeline hazard timing tests.
pub mod hazards;

//! The target assignment engine.
//!
//! Requirement calculation feeds flight materialization, which feeds slot
//! assignment; validation and ranking helpers sit alongside. Every stage
//! reads a competition snapshot and returns derived state; nothing here
//! mutates or locks.

pub mod assignment;
pub mod flights;
pub mod grouping;
pub mod rankings;
pub mod requirements;
pub mod validation;

pub use assignment::{assign_slots, unassigned_archers};
pub use flights::materialize_flights;
pub use grouping::{group_by_spec_key, to_balanced_groups};
pub use rankings::compute_rankings;
pub use requirements::{compute_target_requirements, TargetRequirement};
pub use validation::{prune_stale_assignments, stale_assignments};

//! Assignment validation.
//!
//! After targets are recomputed, old assignments can point at a target
//! number that no longer exists or at a position a shrunken target no longer
//! offers. The assignment engine carries such entries untouched; these
//! helpers let callers detect and prune them.

use crate::models::flight::{Flight, TargetAssignment, TargetPosition};

/// Assignments referencing a vanished target or a position beyond its
/// capacity.
pub fn stale_assignments(flight: &Flight) -> Vec<&TargetAssignment> {
    flight.assignments.iter().filter(|a| is_stale(flight, a)).collect()
}

/// The flight's assignments with stale entries removed. The flight itself
/// is left untouched.
pub fn prune_stale_assignments(flight: &Flight) -> Vec<TargetAssignment> {
    flight
        .assignments
        .iter()
        .filter(|a| !is_stale(flight, a))
        .copied()
        .collect()
}

fn is_stale(flight: &Flight, assignment: &TargetAssignment) -> bool {
    match flight.target(assignment.target_number) {
        Some(target) => {
            !TargetPosition::alphabet(target.max_archers).contains(&assignment.position)
        }
        None => true,
    }
}

//! Slot assignment.
//!
//! Places each eligible, not-yet-assigned archer of a flight on a
//! (target, position) slot. Placement is first-fit: groups in roster order,
//! targets in ascending number order, positions A before B before C. Already
//! placed archers are never moved. Capacity shortfalls degrade to partial
//! assignment, never to an error.

use tracing::warn;

use crate::data::embedded::find_target_spec;
use crate::engine::grouping::group_by_spec_key;
use crate::models::archer::Archer;
use crate::models::competition::Competition;
use crate::models::flight::{Flight, TargetAssignment, TargetPosition};

/// Assign free slots to the flight's eligible archers.
///
/// With `keep_existing_assignments` the current assignments stay untouched
/// and only archers without one are placed; otherwise the slate is wiped and
/// every eligible member is placed anew. The returned list is the preserved
/// assignments followed by the new ones.
pub fn assign_slots(
    competition: &Competition,
    flight: &Flight,
    keep_existing_assignments: bool,
) -> Vec<TargetAssignment> {
    let mut assignments = if keep_existing_assignments {
        flight.assignments.clone()
    } else {
        Vec::new()
    };

    // Free positions per target. Preserved occupants are subtracted; entries
    // pointing at vanished targets or positions beyond capacity subtract
    // nothing, but stay in the result.
    let mut available: Vec<(u32, Vec<TargetPosition>)> = flight
        .targets
        .iter()
        .map(|target| (target.number, TargetPosition::alphabet(target.max_archers).to_vec()))
        .collect();
    for assignment in &assignments {
        if let Some((_, positions)) = available
            .iter_mut()
            .find(|(number, _)| *number == assignment.target_number)
        {
            positions.retain(|p| *p != assignment.position);
        }
    }

    let members: Vec<&Archer> = competition
        .archers
        .iter()
        .filter(|archer| {
            archer.is_auto_assignable()
                && archer.flight_membership() == flight.id
                && assignments.iter().all(|a| a.archer_id != archer.id)
        })
        .collect();

    for ((bow_type, age_category), group) in group_by_spec_key(&members) {
        let Some(spec) = find_target_spec(competition.competition_type, bow_type, age_category)
        else {
            warn!(
                "No target spec for {}/{}/{}; {} archers left unassigned",
                competition.competition_type,
                bow_type,
                age_category,
                group.len()
            );
            continue;
        };

        let mut compatible: Vec<u32> = flight
            .targets
            .iter()
            .filter(|t| t.distance == spec.distance && t.face_size == spec.face_size)
            .map(|t| t.number)
            .collect();
        compatible.sort_unstable();
        if compatible.is_empty() {
            warn!(
                "Flight {} has no {}m/{}cm target; {} archers left unassigned",
                flight.id,
                spec.distance,
                spec.face_size,
                group.len()
            );
            continue;
        }

        for archer in group {
            match take_first_free(&mut available, &compatible) {
                Some((target_number, position)) => {
                    assignments.push(TargetAssignment {
                        archer_id: archer.id,
                        target_number,
                        position,
                        flight_id: flight.id,
                    });
                }
                None => {
                    warn!(
                        "Flight {} ran out of {}m/{}cm positions; archer {} left unassigned",
                        flight.id, spec.distance, spec.face_size, archer.id
                    );
                }
            }
        }
    }

    assignments
}

/// First compatible target with a free position, lowest number first,
/// positions handed out in alphabet order.
fn take_first_free(
    available: &mut [(u32, Vec<TargetPosition>)],
    compatible: &[u32],
) -> Option<(u32, TargetPosition)> {
    for number in compatible {
        if let Some((_, positions)) =
            available.iter_mut().find(|(candidate, _)| *candidate == *number)
        {
            if !positions.is_empty() {
                return Some((*number, positions.remove(0)));
            }
        }
    }
    None
}

/// The flight's eligible members still holding no assignment.
pub fn unassigned_archers<'a>(competition: &'a Competition, flight: &Flight) -> Vec<&'a Archer> {
    competition
        .archers
        .iter()
        .filter(|archer| {
            archer.is_auto_assignable()
                && archer.flight_membership() == flight.id
                && flight.assignment_for(archer.id).is_none()
        })
        .collect()
}

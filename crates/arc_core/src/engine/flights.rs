//! Flight materializer.
//!
//! Rebuilds the flight list from the archers' declared memberships. Flights
//! come out numbered 1..n; gaps in membership values disappear. Targets are
//! always recomputed from the members; name, start time and assignments
//! carry over from the existing flight with the same resulting id.

use tracing::debug;

use crate::engine::requirements::compute_target_requirements;
use crate::error::ScheduleError;
use crate::models::archer::Archer;
use crate::models::competition::Competition;
use crate::models::flight::{Flight, Target};

/// Rebuild the flight list from current memberships.
///
/// An archer with no membership counts for flight 1. A partition whose
/// archers are all hand-placed still materializes, with no targets.
pub fn materialize_flights(competition: &Competition) -> Result<Vec<Flight>, ScheduleError> {
    // Partition every archer by membership value, then order partitions by
    // that value. Output ids are the partition ranks, not the values.
    let mut partitions: Vec<(u32, Vec<&Archer>)> = Vec::new();
    for archer in &competition.archers {
        let membership = archer.flight_membership();
        match partitions.iter_mut().find(|(value, _)| *value == membership) {
            Some((_, members)) => members.push(archer),
            None => partitions.push((membership, vec![archer])),
        }
    }
    partitions.sort_by_key(|(value, _)| *value);

    let mut flights = Vec::with_capacity(partitions.len());
    for (index, (membership, members)) in partitions.into_iter().enumerate() {
        let flight_id = index as u32 + 1;
        let requirements = compute_target_requirements(competition, members.iter().copied())?;
        let targets: Vec<Target> = requirements
            .iter()
            .enumerate()
            .map(|(i, requirement)| Target {
                number: i as u32 + 1,
                distance: requirement.distance,
                face_size: requirement.face_size,
                max_archers: requirement.max_archers,
            })
            .collect();
        debug!(
            "Flight {} (membership {}, {} archers): {} targets",
            flight_id,
            membership,
            members.len(),
            targets.len()
        );
        let existing = competition.flight(flight_id);
        flights.push(Flight {
            id: flight_id,
            name: existing
                .map(|f| f.name.clone())
                .unwrap_or_else(|| Flight::default_name(flight_id)),
            start_time: existing.and_then(|f| f.start_time),
            targets,
            assignments: existing.map(|f| f.assignments.clone()).unwrap_or_default(),
        });
    }
    Ok(flights)
}

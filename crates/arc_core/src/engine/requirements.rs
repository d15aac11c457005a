//! Target requirement calculator.
//!
//! From a set of archers, work out how many targets the competition must
//! provide, at which distance, with which face, shared by how many. Archers
//! who are hand-placed (beginners, disabled, visually impaired) are not
//! counted here.

use tracing::debug;

use crate::data::embedded::find_target_spec;
use crate::error::ScheduleError;
use crate::models::archer::Archer;
use crate::models::competition::Competition;
use crate::models::flight::TargetSpec;

/// One target to provide. Equal requirements are interchangeable; the
/// quantity needed is expressed by repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetRequirement {
    /// Shooting distance in meters.
    pub distance: u32,
    /// Face size in centimeters.
    pub face_size: u32,
    /// How many archers share one such target.
    pub max_archers: u8,
}

impl TargetRequirement {
    pub fn spec(&self) -> TargetSpec {
        TargetSpec { distance: self.distance, face_size: self.face_size }
    }
}

/// Compute the target list needed to host `archers`, sorted by distance then
/// face size.
///
/// Archers are bucketed by the requirement their (bow, age) class resolves
/// to; each bucket yields `ceil(count / max_archers)` identical targets.
/// An archer whose class has no entry in the specification table is a
/// [`ScheduleError::ConfigurationGap`].
pub fn compute_target_requirements<'a, I>(
    competition: &Competition,
    archers: I,
) -> Result<Vec<TargetRequirement>, ScheduleError>
where
    I: IntoIterator<Item = &'a Archer>,
{
    // Bucket eligible archers by requirement, first-seen order.
    let mut groups: Vec<(TargetRequirement, usize)> = Vec::new();
    for archer in archers {
        if !archer.is_auto_assignable() {
            continue;
        }
        let spec = find_target_spec(
            competition.competition_type,
            archer.bow_type,
            archer.age_category,
        )
        .ok_or(ScheduleError::ConfigurationGap {
            competition_type: competition.competition_type,
            bow_type: archer.bow_type,
            age_category: archer.age_category,
            archer_id: archer.id,
        })?;
        let requirement = TargetRequirement {
            distance: spec.distance,
            face_size: spec.face_size,
            max_archers: competition.max_archers_for(archer.bow_type, spec.distance),
        };
        match groups.iter_mut().find(|(existing, _)| *existing == requirement) {
            Some((_, count)) => *count += 1,
            None => groups.push((requirement, 1)),
        }
    }

    let mut requirements = Vec::new();
    for (requirement, count) in groups {
        let needed = count.div_ceil(usize::from(requirement.max_archers.max(1)));
        debug!(
            "{} archers at {}m/{}cm need {} targets of {}",
            count, requirement.distance, requirement.face_size, needed, requirement.max_archers
        );
        requirements.extend(std::iter::repeat(requirement).take(needed));
    }

    // Stable: equal (distance, face) buckets keep their first-seen order.
    requirements.sort_by_key(|r| (r.distance, r.face_size));
    Ok(requirements)
}

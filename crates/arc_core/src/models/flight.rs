//! Flights, targets and slot assignments.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Per-target capacity when neither a limit rule nor a competition override
/// applies.
pub const DEFAULT_MAX_ARCHERS: u8 = 4;

/// Shooting position letter at a shared target, in assignment order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum TargetPosition {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl TargetPosition {
    /// Full position alphabet, in the order slots are handed out.
    pub const ALL: [TargetPosition; 6] = [
        TargetPosition::A,
        TargetPosition::B,
        TargetPosition::C,
        TargetPosition::D,
        TargetPosition::E,
        TargetPosition::F,
    ];

    /// The positions a target of the given capacity offers (the alphabet
    /// truncated to `max_archers`, at most six).
    pub fn alphabet(max_archers: u8) -> &'static [TargetPosition] {
        &Self::ALL[..(max_archers as usize).min(Self::ALL.len())]
    }

    pub fn letter(&self) -> &'static str {
        match self {
            TargetPosition::A => "A",
            TargetPosition::B => "B",
            TargetPosition::C => "C",
            TargetPosition::D => "D",
            TargetPosition::E => "E",
            TargetPosition::F => "F",
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "A" => Some(TargetPosition::A),
            "B" => Some(TargetPosition::B),
            "C" => Some(TargetPosition::C),
            "D" => Some(TargetPosition::D),
            "E" => Some(TargetPosition::E),
            "F" => Some(TargetPosition::F),
            _ => None,
        }
    }
}

impl fmt::Display for TargetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Shooting requirement resolved for one (competition type, bow, age)
/// combination: distance in meters, face size in centimeters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub struct TargetSpec {
    pub distance: u32,
    pub face_size: u32,
}

/// A physical numbered target inside one flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Target {
    /// 1-based number, unique within the flight.
    pub number: u32,
    /// Shooting distance in meters.
    pub distance: u32,
    /// Face size in centimeters.
    pub face_size: u32,
    /// How many archers share this target (positions A.. up to here).
    pub max_archers: u8,
}

impl Target {
    pub fn spec(&self) -> TargetSpec {
        TargetSpec { distance: self.distance, face_size: self.face_size }
    }
}

/// Binding of one archer to one (target, position) slot in one flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct TargetAssignment {
    pub archer_id: Uuid,
    pub target_number: u32,
    pub position: TargetPosition,
    pub flight_id: u32,
}

/// A named, time-boxed shooting session: numbered targets plus the archer
/// slot assignments on them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Flight {
    /// 1-based, stable identity referenced by archers and assignments.
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    pub targets: Vec<Target>,
    pub assignments: Vec<TargetAssignment>,
}

impl Flight {
    /// Default display name for flight `id`.
    pub fn default_name(id: u32) -> String {
        format!("Départ {}", id)
    }

    /// Fresh flight populated with `target_count` default 18 m / 40 cm
    /// targets, as created before the organizer runs the engine.
    pub fn with_default_targets(id: u32, target_count: u32) -> Self {
        Flight {
            id,
            name: Self::default_name(id),
            start_time: None,
            targets: (1..=target_count)
                .map(|number| Target {
                    number,
                    distance: 18,
                    face_size: 40,
                    max_archers: DEFAULT_MAX_ARCHERS,
                })
                .collect(),
            assignments: Vec::new(),
        }
    }

    pub fn target(&self, number: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.number == number)
    }

    /// The assignment held by an archer in this flight, if any.
    pub fn assignment_for(&self, archer_id: Uuid) -> Option<&TargetAssignment> {
        self.assignments.iter().find(|a| a.archer_id == archer_id)
    }
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_truncates_to_capacity() {
        assert_eq!(TargetPosition::alphabet(4), &TargetPosition::ALL[..4]);
        assert_eq!(TargetPosition::alphabet(6), &TargetPosition::ALL[..]);
        assert_eq!(TargetPosition::alphabet(9), &TargetPosition::ALL[..]);
        assert!(TargetPosition::alphabet(0).is_empty());
    }

    #[test]
    fn letters_round_trip() {
        for position in TargetPosition::ALL {
            assert_eq!(TargetPosition::from_letter(position.letter()), Some(position));
        }
        assert_eq!(TargetPosition::from_letter("G"), None);
    }

    #[test]
    fn default_flight_has_numbered_default_targets() {
        let flight = Flight::with_default_targets(2, 3);
        assert_eq!(flight.id, 2);
        assert_eq!(flight.name, "Départ 2");
        assert_eq!(flight.targets.len(), 3);
        assert_eq!(
            flight.targets.iter().map(|t| t.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        for target in &flight.targets {
            assert_eq!((target.distance, target.face_size), (18, 40));
            assert_eq!(target.max_archers, DEFAULT_MAX_ARCHERS);
        }
        assert!(flight.assignments.is_empty());
        assert!(flight.start_time.is_none());
    }

    #[test]
    fn target_lookup_by_number() {
        let flight = Flight::with_default_targets(1, 2);
        assert_eq!(flight.target(2).map(|t| t.number), Some(2));
        assert!(flight.target(5).is_none());
    }
}

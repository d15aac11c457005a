//! Score sheets: rounds, ends and arrows with their roll-ups.
//!
//! A sheet is tied to the slot the archer shot from (flight, target,
//! position). Totals are stored denormalized at every level and recomputed
//! from the arrows whenever one changes, so direct round-total entry and
//! arrow-by-arrow entry can coexist.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::flight::TargetPosition;

/// Rounds per score sheet ("séries").
pub const ROUNDS_PER_SCORE: u32 = 2;
/// Ends per round ("volées").
pub const ENDS_PER_ROUND: usize = 10;
/// Arrows per end.
pub const ARROWS_PER_END: usize = 3;
/// Highest value a single arrow can score.
pub const MAX_ARROW_VALUE: u8 = 10;
/// Highest total a round can reach (10 ends of 3 arrows at 10).
pub const MAX_ROUND_TOTAL: u32 = 300;
/// Highest ten or nine count a round can reach.
pub const MAX_ROUND_COUNT: u32 = 30;

/// What happened to an arrow on the line.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowStatus {
    /// Scored normally.
    #[default]
    Valid,
    /// Fell before the line; does not score.
    Dropped,
    /// Annulled by the arbitrator.
    Annulled,
    /// Never shot.
    NotShot,
}

impl ArrowStatus {
    /// Whether an arrow in this status contributes to totals.
    pub fn counts(&self) -> bool {
        matches!(self, ArrowStatus::Valid)
    }
}

/// One arrow: its value when known, and its status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Arrow {
    pub value: Option<u8>,
    #[serde(default)]
    pub status: ArrowStatus,
}

impl Arrow {
    /// Points this arrow brings to its end total.
    pub fn points(&self) -> u32 {
        if self.status.counts() {
            u32::from(self.value.unwrap_or(0))
        } else {
            0
        }
    }

    /// Whether this arrow counts as a hit of exactly `value`.
    pub fn is_counted(&self, value: u8) -> bool {
        self.status.counts() && self.value == Some(value)
    }
}

/// One end of [`ARROWS_PER_END`] arrows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct End {
    pub id: Uuid,
    pub arrows: Vec<Arrow>,
    pub total: u32,
}

impl End {
    pub fn empty() -> Self {
        End {
            id: Uuid::new_v4(),
            arrows: vec![Arrow::default(); ARROWS_PER_END],
            total: 0,
        }
    }

    /// Total recomputed from the arrows, ignoring the stored one.
    pub fn computed_total(&self) -> u32 {
        self.arrows.iter().map(Arrow::points).sum()
    }

    /// How many arrows in this end scored exactly `value`.
    pub fn count_value(&self, value: u8) -> u32 {
        self.arrows.iter().filter(|a| a.is_counted(value)).count() as u32
    }
}

/// One round ("série") of [`ENDS_PER_ROUND`] ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Round {
    /// 1-based within the sheet.
    pub id: u32,
    pub ends: Vec<End>,
    pub total: u32,
    pub tens: u32,
    pub nines: u32,
    #[serde(default)]
    pub eights: u32,
}

impl Round {
    pub fn empty(id: u32) -> Self {
        Round {
            id,
            ends: (0..ENDS_PER_ROUND).map(|_| End::empty()).collect(),
            total: 0,
            tens: 0,
            nines: 0,
            eights: 0,
        }
    }

    /// Recompute every end total and the round roll-ups from the arrows.
    pub fn recompute(&mut self) {
        for end in &mut self.ends {
            end.total = end.computed_total();
        }
        self.total = self.ends.iter().map(|e| e.total).sum();
        self.tens = self.ends.iter().map(|e| e.count_value(10)).sum();
        self.nines = self.ends.iter().map(|e| e.count_value(9)).sum();
        self.eights = self.ends.iter().map(|e| e.count_value(8)).sum();
    }
}

/// Score sheet for one archer in one flight slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ArcherScore {
    pub id: Uuid,
    pub archer_id: Uuid,
    pub flight_id: u32,
    pub target_number: u32,
    pub position: TargetPosition,
    pub rounds: Vec<Round>,
    pub total: u32,
    pub tens: u32,
    pub nines: u32,
    #[serde(default)]
    pub eights: u32,
}

impl ArcherScore {
    /// Fresh empty sheet for the given slot.
    pub fn new(
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
        position: TargetPosition,
    ) -> Self {
        ArcherScore {
            id: Uuid::new_v4(),
            archer_id,
            flight_id,
            target_number,
            position,
            rounds: (1..=ROUNDS_PER_SCORE).map(Round::empty).collect(),
            total: 0,
            tens: 0,
            nines: 0,
            eights: 0,
        }
    }

    pub fn round_mut(&mut self, round_id: u32) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|r| r.id == round_id)
    }

    /// Re-derive the sheet totals from the round totals.
    pub fn roll_up(&mut self) {
        self.total = self.rounds.iter().map(|r| r.total).sum();
        self.tens = self.rounds.iter().map(|r| r.tens).sum();
        self.nines = self.rounds.iter().map(|r| r.nines).sum();
        self.eights = self.rounds.iter().map(|r| r.eights).sum();
    }
}

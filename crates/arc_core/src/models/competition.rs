//! The competition aggregate: identity, configuration, roster, flights and
//! score sheets, with the status gates every mutation goes through.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::archer::Archer;
use crate::models::category::{BowTypeCode, CompetitionType};
use crate::models::flight::{
    Flight, Target, TargetAssignment, TargetPosition, DEFAULT_MAX_ARCHERS,
};
use crate::models::score::{
    ArcherScore, Arrow, ArrowStatus, MAX_ARROW_VALUE, MAX_ROUND_COUNT, MAX_ROUND_TOTAL,
};

/// Lifecycle of a competition: configuration, shooting, archive.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum CompetitionStatus {
    /// Being configured: roster, flights and targets are editable.
    #[default]
    Draft,
    /// Competition day: attendance and scores are editable.
    Active,
    /// Closed: read-only, rankings remain available.
    Completed,
}

impl CompetitionStatus {
    pub fn code(&self) -> &'static str {
        match self {
            CompetitionStatus::Draft => "draft",
            CompetitionStatus::Active => "active",
            CompetitionStatus::Completed => "completed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "draft" => Some(CompetitionStatus::Draft),
            "active" => Some(CompetitionStatus::Active),
            "completed" => Some(CompetitionStatus::Completed),
            _ => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, CompetitionStatus::Draft)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CompetitionStatus::Active)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CompetitionStatus::Completed)
    }
}

impl fmt::Display for CompetitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Capacity override: targets at `distance` shot with `bow_type` take at most
/// `max_archers` archers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct TargetLimitRule {
    pub bow_type: BowTypeCode,
    pub distance: u32,
    pub max_archers: u8,
}

/// Editable competition configuration, as entered by the organizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CompetitionInfo {
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub competition_type: CompetitionType,
    pub organizing_club: String,
    pub arbitrator_name: String,
    pub number_of_targets: u32,
    pub number_of_flights: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_archers: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_limit_rules: Vec<TargetLimitRule>,
}

/// One competition with everything it owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    #[serde(rename = "type")]
    pub competition_type: CompetitionType,
    pub organizing_club: String,
    pub arbitrator_name: String,
    pub status: CompetitionStatus,
    pub number_of_targets: u32,
    pub number_of_flights: u32,
    /// Per-competition capacity override; rules take precedence, the
    /// engine-wide default applies last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_archers: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_limit_rules: Vec<TargetLimitRule>,
    pub archers: Vec<Archer>,
    pub flights: Vec<Flight>,
    pub scores: Vec<ArcherScore>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    /// Create a draft competition with flights `1..=number_of_flights`
    /// pre-filled with default targets. Zero flights is bumped to one.
    pub fn new(info: CompetitionInfo) -> Self {
        let now = Utc::now();
        let flight_count = info.number_of_flights.max(1);
        Competition {
            id: Uuid::new_v4(),
            name: info.name,
            date: info.date,
            location: info.location,
            competition_type: info.competition_type,
            organizing_club: info.organizing_club,
            arbitrator_name: info.arbitrator_name,
            status: CompetitionStatus::Draft,
            number_of_targets: info.number_of_targets,
            number_of_flights: flight_count,
            default_max_archers: info.default_max_archers,
            target_limit_rules: info.target_limit_rules,
            archers: Vec::new(),
            flights: (1..=flight_count)
                .map(|id| Flight::with_default_targets(id, info.number_of_targets))
                .collect(),
            scores: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn require_setup(&self) -> Result<(), StoreError> {
        if self.status.is_draft() {
            Ok(())
        } else {
            Err(StoreError::StatusGate {
                required: CompetitionStatus::Draft,
                actual: self.status,
            })
        }
    }

    fn require_scoring(&self) -> Result<(), StoreError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(StoreError::StatusGate {
                required: CompetitionStatus::Active,
                actual: self.status,
            })
        }
    }

    // ========================================================================
    // Status predicates
    // ========================================================================

    pub fn can_edit_info(&self) -> bool {
        self.status.is_draft()
    }

    pub fn can_edit_archers(&self) -> bool {
        self.status.is_draft()
    }

    pub fn can_edit_flights(&self) -> bool {
        self.status.is_draft()
    }

    pub fn can_edit_targets(&self) -> bool {
        self.status.is_draft()
    }

    pub fn can_record_scores(&self) -> bool {
        self.status.is_active()
    }

    pub fn can_view_rankings(&self) -> bool {
        self.status.is_active() || self.status.is_completed()
    }

    // ========================================================================
    // Capacity resolution
    // ========================================================================

    /// Capacity for a target: limit rule for (bow, distance) first, then the
    /// competition-wide override, then the engine default of 4.
    pub fn max_archers_for(&self, bow_type: BowTypeCode, distance: u32) -> u8 {
        self.target_limit_rules
            .iter()
            .find(|rule| rule.bow_type == bow_type && rule.distance == distance)
            .map(|rule| rule.max_archers)
            .or(self.default_max_archers)
            .unwrap_or(DEFAULT_MAX_ARCHERS)
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Replace the editable configuration. Flights are left alone; the
    /// organizer re-runs the flight engine when counts change.
    pub fn update_info(&mut self, info: CompetitionInfo) -> Result<(), StoreError> {
        self.require_setup()?;
        self.name = info.name;
        self.date = info.date;
        self.location = info.location;
        self.competition_type = info.competition_type;
        self.organizing_club = info.organizing_club;
        self.arbitrator_name = info.arbitrator_name;
        self.number_of_targets = info.number_of_targets;
        self.number_of_flights = info.number_of_flights;
        self.default_max_archers = info.default_max_archers;
        self.target_limit_rules = info.target_limit_rules;
        self.touch();
        Ok(())
    }

    /// Status transitions are always allowed; the organizer owns them.
    pub fn set_status(&mut self, status: CompetitionStatus) {
        self.status = status;
        self.touch();
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Register an archer. The store owns identity: any incoming id is
    /// replaced with a fresh one, which is returned.
    pub fn add_archer(&mut self, mut archer: Archer) -> Result<Uuid, StoreError> {
        self.require_setup()?;
        archer.id = Uuid::new_v4();
        let id = archer.id;
        self.archers.push(archer);
        self.touch();
        Ok(id)
    }

    pub fn update_archer(&mut self, archer: Archer) -> Result<(), StoreError> {
        self.require_setup()?;
        let existing = self
            .archers
            .iter_mut()
            .find(|a| a.id == archer.id)
            .ok_or(StoreError::UnknownArcher(archer.id))?;
        *existing = archer;
        self.touch();
        Ok(())
    }

    pub fn remove_archer(&mut self, archer_id: Uuid) -> Result<Archer, StoreError> {
        self.require_setup()?;
        let index = self
            .archers
            .iter()
            .position(|a| a.id == archer_id)
            .ok_or(StoreError::UnknownArcher(archer_id))?;
        let removed = self.archers.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Bulk registration, ids preserved: archers whose id already exists are
    /// updated in place, the rest are appended.
    pub fn import_archers(&mut self, archers: Vec<Archer>) -> Result<(), StoreError> {
        self.require_setup()?;
        for incoming in archers {
            match self.archers.iter_mut().find(|a| a.id == incoming.id) {
                Some(existing) => *existing = incoming,
                None => self.archers.push(incoming),
            }
        }
        self.touch();
        Ok(())
    }

    pub fn set_archer_flight(
        &mut self,
        archer_id: Uuid,
        flight_id: Option<u32>,
    ) -> Result<(), StoreError> {
        self.require_setup()?;
        let archer = self
            .archers
            .iter_mut()
            .find(|a| a.id == archer_id)
            .ok_or(StoreError::UnknownArcher(archer_id))?;
        archer.flight_id = flight_id;
        self.touch();
        Ok(())
    }

    /// Attendance is taken on competition day.
    pub fn set_archer_presence(
        &mut self,
        archer_id: Uuid,
        is_present: bool,
    ) -> Result<(), StoreError> {
        self.require_scoring()?;
        let archer = self
            .archers
            .iter_mut()
            .find(|a| a.id == archer_id)
            .ok_or(StoreError::UnknownArcher(archer_id))?;
        archer.is_present = is_present;
        self.touch();
        Ok(())
    }

    // ========================================================================
    // Flights and targets
    // ========================================================================

    /// Append a flight with default targets. Ids never collide with removed
    /// flights: the next id is one past the highest in use.
    pub fn add_flight(&mut self) -> Result<u32, StoreError> {
        self.require_setup()?;
        let id = self.flights.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        self.flights.push(Flight::with_default_targets(id, self.number_of_targets));
        self.number_of_flights = self.flights.len() as u32;
        self.touch();
        Ok(id)
    }

    pub fn rename_flight(&mut self, flight_id: u32, name: String) -> Result<(), StoreError> {
        self.require_setup()?;
        let flight = self
            .flights
            .iter_mut()
            .find(|f| f.id == flight_id)
            .ok_or(StoreError::UnknownFlight(flight_id))?;
        flight.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_flight_start_time(
        &mut self,
        flight_id: u32,
        start_time: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        self.require_setup()?;
        let flight = self
            .flights
            .iter_mut()
            .find(|f| f.id == flight_id)
            .ok_or(StoreError::UnknownFlight(flight_id))?;
        flight.start_time = start_time;
        self.touch();
        Ok(())
    }

    /// Install the flight engine's output wholesale.
    pub fn replace_flights(&mut self, flights: Vec<Flight>) -> Result<(), StoreError> {
        self.require_setup()?;
        self.flights = flights;
        self.number_of_flights = self.flights.len() as u32;
        self.touch();
        Ok(())
    }

    pub fn remove_flight(&mut self, flight_id: u32) -> Result<Flight, StoreError> {
        self.require_setup()?;
        let index = self
            .flights
            .iter()
            .position(|f| f.id == flight_id)
            .ok_or(StoreError::UnknownFlight(flight_id))?;
        let removed = self.flights.remove(index);
        self.number_of_flights = self.flights.len() as u32;
        self.touch();
        Ok(removed)
    }

    /// Replace one target, matched by its number inside the flight.
    pub fn update_target(&mut self, flight_id: u32, target: Target) -> Result<(), StoreError> {
        self.require_setup()?;
        let flight = self
            .flights
            .iter_mut()
            .find(|f| f.id == flight_id)
            .ok_or(StoreError::UnknownFlight(flight_id))?;
        let existing = flight
            .targets
            .iter_mut()
            .find(|t| t.number == target.number)
            .ok_or(StoreError::UnknownTarget { flight_id, target_number: target.number })?;
        *existing = target;
        self.touch();
        Ok(())
    }

    /// Install the slot engine's output for one flight.
    pub fn replace_assignments(
        &mut self,
        flight_id: u32,
        assignments: Vec<TargetAssignment>,
    ) -> Result<(), StoreError> {
        self.require_setup()?;
        let flight = self
            .flights
            .iter_mut()
            .find(|f| f.id == flight_id)
            .ok_or(StoreError::UnknownFlight(flight_id))?;
        flight.assignments = assignments;
        self.touch();
        Ok(())
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn archer(&self, archer_id: Uuid) -> Option<&Archer> {
        self.archers.iter().find(|a| a.id == archer_id)
    }

    pub fn flight(&self, flight_id: u32) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == flight_id)
    }

    pub fn score_for(
        &self,
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
    ) -> Option<&ArcherScore> {
        self.scores.iter().find(|s| {
            s.archer_id == archer_id && s.flight_id == flight_id && s.target_number == target_number
        })
    }

    fn score_mut(
        &mut self,
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
    ) -> Result<&mut ArcherScore, StoreError> {
        self.scores
            .iter_mut()
            .find(|s| {
                s.archer_id == archer_id
                    && s.flight_id == flight_id
                    && s.target_number == target_number
            })
            .ok_or(StoreError::UnknownScore { archer_id, flight_id, target_number })
    }

    // ========================================================================
    // Scoring
    // ========================================================================

    /// The sheet for a slot, created empty on first use.
    pub fn get_or_create_score(
        &mut self,
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
        position: TargetPosition,
    ) -> Result<&mut ArcherScore, StoreError> {
        self.require_scoring()?;
        let index = match self.scores.iter().position(|s| {
            s.archer_id == archer_id && s.flight_id == flight_id && s.target_number == target_number
        }) {
            Some(index) => index,
            None => {
                self.scores
                    .push(ArcherScore::new(archer_id, flight_id, target_number, position));
                self.touch();
                self.scores.len() - 1
            }
        };
        Ok(&mut self.scores[index])
    }

    /// Record one arrow value and refresh every roll-up above it.
    #[allow(clippy::too_many_arguments)]
    pub fn record_arrow(
        &mut self,
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
        round_id: u32,
        end_index: usize,
        arrow_index: usize,
        value: u8,
    ) -> Result<(), StoreError> {
        self.require_scoring()?;
        if value > MAX_ARROW_VALUE {
            return Err(StoreError::ValueOutOfRange {
                value: u32::from(value),
                max: u32::from(MAX_ARROW_VALUE),
            });
        }
        let score = self.score_mut(archer_id, flight_id, target_number)?;
        let round = score
            .round_mut(round_id)
            .ok_or(StoreError::UnknownRound(round_id))?;
        let end = round
            .ends
            .get_mut(end_index)
            .ok_or(StoreError::UnknownEnd(round_id, end_index))?;
        let arrow = end
            .arrows
            .get_mut(arrow_index)
            .ok_or(StoreError::UnknownArrow(arrow_index))?;
        *arrow = Arrow { value: Some(value), status: ArrowStatus::Valid };
        round.recompute();
        score.roll_up();
        self.touch();
        Ok(())
    }

    /// Enter a round total directly, for sheets kept on paper.
    pub fn set_round_total(
        &mut self,
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
        round_id: u32,
        total: u32,
    ) -> Result<(), StoreError> {
        self.require_scoring()?;
        if total > MAX_ROUND_TOTAL {
            return Err(StoreError::ValueOutOfRange { value: total, max: MAX_ROUND_TOTAL });
        }
        let score = self.score_mut(archer_id, flight_id, target_number)?;
        let round = score
            .round_mut(round_id)
            .ok_or(StoreError::UnknownRound(round_id))?;
        round.total = total;
        score.roll_up();
        self.touch();
        Ok(())
    }

    pub fn set_round_tens(
        &mut self,
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
        round_id: u32,
        tens: u32,
    ) -> Result<(), StoreError> {
        self.require_scoring()?;
        if tens > MAX_ROUND_COUNT {
            return Err(StoreError::ValueOutOfRange { value: tens, max: MAX_ROUND_COUNT });
        }
        let score = self.score_mut(archer_id, flight_id, target_number)?;
        let round = score
            .round_mut(round_id)
            .ok_or(StoreError::UnknownRound(round_id))?;
        round.tens = tens;
        score.roll_up();
        self.touch();
        Ok(())
    }

    pub fn set_round_nines(
        &mut self,
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
        round_id: u32,
        nines: u32,
    ) -> Result<(), StoreError> {
        self.require_scoring()?;
        if nines > MAX_ROUND_COUNT {
            return Err(StoreError::ValueOutOfRange { value: nines, max: MAX_ROUND_COUNT });
        }
        let score = self.score_mut(archer_id, flight_id, target_number)?;
        let round = score
            .round_mut(round_id)
            .ok_or(StoreError::UnknownRound(round_id))?;
        round.nines = nines;
        score.roll_up();
        self.touch();
        Ok(())
    }

    // ========================================================================
    // Snapshot exchange
    // ========================================================================

    /// Generate the JSON schema for competition snapshots.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Competition)
    }

    /// Serialize to JSON with pretty printing
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

use thiserror::Error;
use uuid::Uuid;

use crate::models::category::{AgeCategoryCode, BowTypeCode, CompetitionType};
use crate::models::competition::CompetitionStatus;

/// Failures raised by the target assignment engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(
        "no target specification for {competition_type}/{bow_type}/{age_category} (archer {archer_id})"
    )]
    ConfigurationGap {
        competition_type: CompetitionType,
        bow_type: BowTypeCode,
        age_category: AgeCategoryCode,
        archer_id: Uuid,
    },
}

/// Failures raised by competition store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown competition: {0}")]
    UnknownCompetition(Uuid),

    #[error("unknown archer: {0}")]
    UnknownArcher(Uuid),

    #[error("unknown flight: {0}")]
    UnknownFlight(u32),

    #[error("unknown target {target_number} in flight {flight_id}")]
    UnknownTarget { flight_id: u32, target_number: u32 },

    #[error("no score sheet for archer {archer_id} on flight {flight_id} target {target_number}")]
    UnknownScore {
        archer_id: Uuid,
        flight_id: u32,
        target_number: u32,
    },

    #[error("unknown round: {0}")]
    UnknownRound(u32),

    #[error("unknown end {1} in round {0}")]
    UnknownEnd(u32, usize),

    #[error("unknown arrow: {0}")]
    UnknownArrow(usize),

    #[error("value out of range: {value} (max {max})")]
    ValueOutOfRange { value: u32, max: u32 },

    #[error("operation requires status {required}, competition is {actual}")]
    StatusGate {
        required: CompetitionStatus,
        actual: CompetitionStatus,
    },
}

impl StoreError {
    /// Whether the error means a referenced entity does not exist, as
    /// opposed to a rejected mutation.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::UnknownCompetition(_) => true,
            StoreError::UnknownArcher(_) => true,
            StoreError::UnknownFlight(_) => true,
            StoreError::UnknownTarget { .. } => true,
            StoreError::UnknownScore { .. } => true,
            StoreError::UnknownRound(_) => true,
            StoreError::UnknownEnd(..) => true,
            StoreError::UnknownArrow(_) => true,
            StoreError::ValueOutOfRange { .. } => false,
            StoreError::StatusGate { .. } => false,
        }
    }
}

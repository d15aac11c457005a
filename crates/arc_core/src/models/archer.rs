//! Registered competitors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::category::{AgeCategoryCode, BowTypeCode, Gender};

/// One registered archer in a competition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Archer {
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub club: String,
    pub department_number: u16,
    pub birth_year: i32,
    pub age_category: AgeCategoryCode,
    pub bow_type: BowTypeCode,
    pub gender: Gender,
    /// Federation ranking category code, when known (e.g. "SMAV").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub license: String,
    /// Which flight the archer shoots in. `None` means flight 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_id: Option<u32>,
    pub is_beginner: bool,
    pub is_disabled: bool,
    pub is_visually_impaired: bool,
    pub is_present: bool,
}

impl Archer {
    /// Flight this archer belongs to; unset membership reads as flight 1.
    pub fn flight_membership(&self) -> u32 {
        self.flight_id.unwrap_or(1)
    }

    /// Whether the engine may seat this archer automatically. Beginners,
    /// disabled and visually impaired archers get hand-placed.
    pub fn is_auto_assignable(&self) -> bool {
        !self.is_beginner && !self.is_disabled && !self.is_visually_impaired
    }

    /// Age category recomputed from the birth year against a reference year,
    /// ignoring the stored one.
    pub fn derived_age_category(&self, reference_year: i32) -> AgeCategoryCode {
        AgeCategoryCode::from_birth_year(self.birth_year, reference_year)
    }

    /// The axes that select this archer's shooting requirement.
    pub fn spec_key(&self) -> (BowTypeCode, AgeCategoryCode) {
        (self.bow_type, self.age_category)
    }
}

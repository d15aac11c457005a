//! Classification axes: competition format, age category, bow type, gender.
//!
//! Codes follow the French federation abbreviations and are the stable wire
//! strings used in snapshots. The shooting parameters each combination maps
//! to live in the embedded tables under [`crate::data`], not here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition format. Selects which target-spec table applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum CompetitionType {
    /// Special 18 m hall round: adult classes stay at 18 m on reduced faces.
    #[serde(rename = "18m")]
    Hall18m,
    /// Standard indoor round (18 m or 25 m depending on class).
    #[serde(rename = "indoor")]
    Indoor,
    /// Outdoor round (15 m to 40 m depending on class).
    #[serde(rename = "outdoor")]
    Outdoor,
}

impl CompetitionType {
    /// Stable code, as stored in competition snapshots.
    pub fn code(&self) -> &'static str {
        match self {
            CompetitionType::Hall18m => "18m",
            CompetitionType::Indoor => "indoor",
            CompetitionType::Outdoor => "outdoor",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "18m" => Some(CompetitionType::Hall18m),
            "indoor" => Some(CompetitionType::Indoor),
            "outdoor" => Some(CompetitionType::Outdoor),
            _ => None,
        }
    }
}

impl fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Age category code. Ranges are inclusive; ages outside the table clamp to
/// the nearest end (`P` below, `SV` above).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum AgeCategoryCode {
    /// Poussin (8-10)
    P,
    /// Benjamin (11-12)
    B,
    /// Minime (13-14)
    M,
    /// Cadet (15-16)
    C,
    /// Junior (17-25)
    J,
    /// Senior (26-49)
    S,
    /// Vétéran (50-64)
    V,
    /// Super Vétéran (65-99)
    SV,
}

impl AgeCategoryCode {
    pub fn code(&self) -> &'static str {
        match self {
            AgeCategoryCode::P => "P",
            AgeCategoryCode::B => "B",
            AgeCategoryCode::M => "M",
            AgeCategoryCode::C => "C",
            AgeCategoryCode::J => "J",
            AgeCategoryCode::S => "S",
            AgeCategoryCode::V => "V",
            AgeCategoryCode::SV => "SV",
        }
    }

    /// French display name.
    pub fn label(&self) -> &'static str {
        match self {
            AgeCategoryCode::P => "Poussin",
            AgeCategoryCode::B => "Benjamin",
            AgeCategoryCode::M => "Minime",
            AgeCategoryCode::C => "Cadet",
            AgeCategoryCode::J => "Junior",
            AgeCategoryCode::S => "Senior",
            AgeCategoryCode::V => "Vétéran",
            AgeCategoryCode::SV => "Super Vétéran",
        }
    }

    /// Inclusive `[min, max]` age range covered by this category.
    pub fn age_range(&self) -> (u8, u8) {
        match self {
            AgeCategoryCode::P => (8, 10),
            AgeCategoryCode::B => (11, 12),
            AgeCategoryCode::M => (13, 14),
            AgeCategoryCode::C => (15, 16),
            AgeCategoryCode::J => (17, 25),
            AgeCategoryCode::S => (26, 49),
            AgeCategoryCode::V => (50, 64),
            AgeCategoryCode::SV => (65, 99),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(AgeCategoryCode::P),
            "B" => Some(AgeCategoryCode::B),
            "M" => Some(AgeCategoryCode::M),
            "C" => Some(AgeCategoryCode::C),
            "J" => Some(AgeCategoryCode::J),
            "S" => Some(AgeCategoryCode::S),
            "V" => Some(AgeCategoryCode::V),
            "SV" => Some(AgeCategoryCode::SV),
            _ => None,
        }
    }

    /// Category for an age in whole years. Ages below the table map to
    /// [`AgeCategoryCode::P`], above to [`AgeCategoryCode::SV`].
    pub fn from_age(age: i32) -> Self {
        match age {
            ..=10 => AgeCategoryCode::P,
            11..=12 => AgeCategoryCode::B,
            13..=14 => AgeCategoryCode::M,
            15..=16 => AgeCategoryCode::C,
            17..=25 => AgeCategoryCode::J,
            26..=49 => AgeCategoryCode::S,
            50..=64 => AgeCategoryCode::V,
            _ => AgeCategoryCode::SV,
        }
    }

    /// Category for a birth year, with ages counted in the reference year.
    pub fn from_birth_year(birth_year: i32, reference_year: i32) -> Self {
        Self::from_age(reference_year - birth_year)
    }
}

impl fmt::Display for AgeCategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Bow type code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum BowTypeCode {
    /// Classique sans viseur (barebow recurve)
    SV,
    /// Classique avec viseur (recurve with sight)
    AV,
    /// Poulie sans viseur (compound without sight)
    COSV,
    /// Poulie avec viseur (compound with sight)
    COAV,
    /// Autre handicape (adaptive archery)
    AH,
}

impl BowTypeCode {
    pub fn code(&self) -> &'static str {
        match self {
            BowTypeCode::SV => "SV",
            BowTypeCode::AV => "AV",
            BowTypeCode::COSV => "COSV",
            BowTypeCode::COAV => "COAV",
            BowTypeCode::AH => "AH",
        }
    }

    /// French display name.
    pub fn label(&self) -> &'static str {
        match self {
            BowTypeCode::SV => "Classique sans viseur",
            BowTypeCode::AV => "Classique avec viseur",
            BowTypeCode::COSV => "Poulie sans viseur",
            BowTypeCode::COAV => "Poulie avec viseur",
            BowTypeCode::AH => "Autre handicape",
        }
    }

    /// Compound (pulley) bows shoot their own category codes.
    pub fn is_compound(&self) -> bool {
        matches!(self, BowTypeCode::COSV | BowTypeCode::COAV)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SV" => Some(BowTypeCode::SV),
            "AV" => Some(BowTypeCode::AV),
            "COSV" => Some(BowTypeCode::COSV),
            "COAV" => Some(BowTypeCode::COAV),
            "AH" => Some(BowTypeCode::AH),
            _ => None,
        }
    }
}

impl fmt::Display for BowTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Archer gender, as printed inside category codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Gender {
    F,
    M,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::F => "F",
            Gender::M => "M",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::F => "Femme",
            Gender::M => "Homme",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F" => Some(Gender::F),
            "M" => Some(Gender::M),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_round_trip() {
        for t in CompetitionType::iter() {
            assert_eq!(CompetitionType::from_code(t.code()), Some(t));
        }
        for c in AgeCategoryCode::iter() {
            assert_eq!(AgeCategoryCode::from_code(c.code()), Some(c));
        }
        for b in BowTypeCode::iter() {
            assert_eq!(BowTypeCode::from_code(b.code()), Some(b));
        }
        for g in Gender::iter() {
            assert_eq!(Gender::from_code(g.code()), Some(g));
        }
    }

    #[test]
    fn serde_uses_the_federation_codes() {
        assert_eq!(serde_json::to_string(&CompetitionType::Hall18m).unwrap(), "\"18m\"");
        assert_eq!(serde_json::to_string(&AgeCategoryCode::SV).unwrap(), "\"SV\"");
        assert_eq!(serde_json::to_string(&BowTypeCode::COAV).unwrap(), "\"COAV\"");
        assert_eq!(serde_json::to_string(&Gender::F).unwrap(), "\"F\"");
        let parsed: CompetitionType = serde_json::from_str("\"outdoor\"").unwrap();
        assert_eq!(parsed, CompetitionType::Outdoor);
    }

    #[test]
    fn age_ranges_are_contiguous() {
        let categories: Vec<_> = AgeCategoryCode::iter().collect();
        for pair in categories.windows(2) {
            assert_eq!(pair[0].age_range().1 + 1, pair[1].age_range().0);
        }
        assert_eq!(categories.first().map(|c| c.age_range().0), Some(8));
        assert_eq!(categories.last().map(|c| c.age_range().1), Some(99));
    }

    #[test]
    fn from_age_matches_the_ranges() {
        for category in AgeCategoryCode::iter() {
            let (min, max) = category.age_range();
            assert_eq!(AgeCategoryCode::from_age(min as i32), category);
            assert_eq!(AgeCategoryCode::from_age(max as i32), category);
        }
    }

    #[test]
    fn from_age_clamps_outside_the_table() {
        assert_eq!(AgeCategoryCode::from_age(3), AgeCategoryCode::P);
        assert_eq!(AgeCategoryCode::from_age(7), AgeCategoryCode::P);
        assert_eq!(AgeCategoryCode::from_age(100), AgeCategoryCode::SV);
    }

    #[test]
    fn from_birth_year_uses_the_reference_year() {
        assert_eq!(AgeCategoryCode::from_birth_year(1990, 2025), AgeCategoryCode::S);
        assert_eq!(AgeCategoryCode::from_birth_year(2014, 2025), AgeCategoryCode::B);
        assert_eq!(AgeCategoryCode::from_birth_year(1959, 2025), AgeCategoryCode::SV);
    }

    #[test]
    fn compound_flags() {
        assert!(BowTypeCode::COSV.is_compound());
        assert!(BowTypeCode::COAV.is_compound());
        assert!(!BowTypeCode::SV.is_compound());
        assert!(!BowTypeCode::AV.is_compound());
        assert!(!BowTypeCode::AH.is_compound());
    }
}

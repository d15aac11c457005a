//! Embedded reference data.
//!
//! The federation tables are compiled into the binary with `include_str!`
//! and parsed once on first access; no file I/O happens at runtime.
//!
//! ## Embedded files
//! - target_specs.json: (competition type → bow type → age category) →
//!   {distance, face_size}
//! - categories.json: the 72-row (age × gender × bow) → category code table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::category::{AgeCategoryCode, BowTypeCode, CompetitionType, Gender};
use crate::models::flight::TargetSpec;

// ============================================================================
// Embedded JSON data (compiled into the binary)
// ============================================================================

/// Target specification table JSON.
pub const TARGET_SPECS_JSON: &str = include_str!("../../../../data/target_specs.json");

/// Competition category table JSON.
pub const CATEGORIES_JSON: &str = include_str!("../../../../data/categories.json");

// ============================================================================
// Types
// ============================================================================

/// Shooting requirement lookup: competition type → bow type → age category.
/// Missing leaves are real gaps (e.g. compounds have no Poussin/Benjamin
/// rows), not defaults.
pub type TargetSpecTable =
    HashMap<CompetitionType, HashMap<BowTypeCode, HashMap<AgeCategoryCode, TargetSpec>>>;

/// One row of the competition category table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRow {
    pub age_category: AgeCategoryCode,
    pub bow_type: BowTypeCode,
    pub gender: Gender,
    /// Federation code, e.g. "SMAV". Every AH row maps to "AH".
    pub code: String,
}

// ============================================================================
// Cached data (parsed once)
// ============================================================================

static TARGET_SPECS: OnceLock<TargetSpecTable> = OnceLock::new();
static CATEGORIES: OnceLock<Vec<CategoryRow>> = OnceLock::new();

// ============================================================================
// Public API
// ============================================================================

/// The full target specification table.
///
/// Parsed on first call, cached afterwards.
pub fn get_target_specs() -> &'static TargetSpecTable {
    TARGET_SPECS.get_or_init(|| {
        serde_json::from_str(TARGET_SPECS_JSON).expect("Embedded target specs JSON is corrupted")
    })
}

/// The competition category table, in federation order.
///
/// Parsed on first call, cached afterwards.
pub fn get_categories() -> &'static [CategoryRow] {
    CATEGORIES
        .get_or_init(|| {
            serde_json::from_str(CATEGORIES_JSON).expect("Embedded categories JSON is corrupted")
        })
        .as_slice()
}

// ============================================================================
// Lookups
// ============================================================================

/// Shooting requirement for one (competition type, bow, age) combination.
/// `None` is a genuine configuration gap.
pub fn find_target_spec(
    competition_type: CompetitionType,
    bow_type: BowTypeCode,
    age_category: AgeCategoryCode,
) -> Option<TargetSpec> {
    get_target_specs()
        .get(&competition_type)?
        .get(&bow_type)?
        .get(&age_category)
        .copied()
}

/// Competition category code for an (age, bow, gender) combination, e.g.
/// (S, AV, M) → "SMAV". Combinations outside the table have no category.
pub fn find_category_code(
    age_category: AgeCategoryCode,
    bow_type: BowTypeCode,
    gender: Gender,
) -> Option<&'static str> {
    get_categories()
        .iter()
        .find(|row| {
            row.age_category == age_category && row.bow_type == bow_type && row.gender == gender
        })
        .map(|row| row.code.as_str())
}

/// Position of a category code in the federation table, for ranking order.
/// Codes shared by several rows (AH) report their first row.
pub fn category_table_index(code: &str) -> Option<usize> {
    get_categories().iter().position(|row| row.code == code)
}

// ============================================================================
// Tests
// ============================================================================

//! Ranking output rows, one block per competition category.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One archer's line in a category ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedArcher {
    pub archer_id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub club: String,
    /// 1-based within the category.
    pub rank: u32,
    pub total: u32,
    pub tens: u32,
    pub nines: u32,
    pub eights: u32,
}

/// All ranked archers of one competition category, best first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankingCategory {
    /// Federation category code, e.g. "SMAV".
    pub code: String,
    pub archers: Vec<RankedArcher>,
}

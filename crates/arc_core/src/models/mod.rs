pub mod archer;
pub mod category;
pub mod competition;
pub mod flight;
pub mod ranking;
pub mod score;

pub use archer::Archer;
pub use category::{AgeCategoryCode, BowTypeCode, CompetitionType, Gender};
pub use competition::{
    Competition, CompetitionInfo, CompetitionStatus, TargetLimitRule,
};
pub use flight::{
    Flight, Target, TargetAssignment, TargetPosition, TargetSpec, DEFAULT_MAX_ARCHERS,
};
pub use ranking::{RankedArcher, RankingCategory};
pub use score::{
    ArcherScore, Arrow, ArrowStatus, End, Round, ARROWS_PER_END, ENDS_PER_ROUND, MAX_ARROW_VALUE,
    MAX_ROUND_COUNT, MAX_ROUND_TOTAL, ROUNDS_PER_SCORE,
};

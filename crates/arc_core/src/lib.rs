//! # arc_core - Archery Competition Management Core
//!
//! This library manages archery competitions end to end: registering
//! archers, distributing them over flights and targets, recording scores
//! arrow by arrow and producing category rankings.
//!
//! ## Features
//! - Deterministic target assignment engine (requirements → flights → slots)
//! - Federation reference tables embedded in the binary
//! - Arrow-by-arrow scoring with automatic roll-ups
//! - Category rankings with federation tiebreak order
//! - JSON snapshots for easy integration with UI front ends

pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod state;

// Re-export engine operations
pub use engine::{
    assign_slots, compute_rankings, compute_target_requirements, materialize_flights,
    prune_stale_assignments, stale_assignments, unassigned_archers, TargetRequirement,
};

// Re-export model types
pub use models::{
    AgeCategoryCode, Archer, ArcherScore, Arrow, ArrowStatus, BowTypeCode, Competition,
    CompetitionInfo, CompetitionStatus, CompetitionType, End, Flight, Gender, RankedArcher,
    RankingCategory, Round, Target, TargetAssignment, TargetLimitRule, TargetPosition, TargetSpec,
};

// Re-export reference data accessors
pub use data::{find_category_code, find_target_spec, get_categories, get_target_specs};

// Re-export errors
pub use error::{ScheduleError, StoreError};

// Re-export state management
pub use state::{get_state, get_state_mut, reset_state, set_state, AppState, APP_STATE};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn indoor_info(name: &str) -> CompetitionInfo {
        CompetitionInfo {
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            location: "Annecy".to_string(),
            competition_type: CompetitionType::Indoor,
            organizing_club: "Les Archers du Lac".to_string(),
            arbitrator_name: "J. Petit".to_string(),
            number_of_targets: 6,
            number_of_flights: 1,
            default_max_archers: None,
            target_limit_rules: Vec::new(),
        }
    }

    fn senior(last_name: &str) -> Archer {
        Archer {
            id: uuid::Uuid::new_v4(),
            last_name: last_name.to_string(),
            first_name: "Test".to_string(),
            club: "Club".to_string(),
            department_number: 74,
            birth_year: 1991,
            age_category: AgeCategoryCode::S,
            bow_type: BowTypeCode::AV,
            gender: Gender::M,
            category: None,
            license: "777777G".to_string(),
            flight_id: None,
            is_beginner: false,
            is_disabled: false,
            is_visually_impaired: false,
            is_present: false,
        }
    }

    #[test]
    fn test_nine_seniors_fill_three_targets() {
        let mut competition = Competition::new(indoor_info("Neuf seniors"));
        for i in 0..9 {
            competition.add_archer(senior(&format!("Archer{}", i + 1))).unwrap();
        }

        let requirements =
            compute_target_requirements(&competition, &competition.archers).unwrap();
        assert_eq!(requirements.len(), 3);
        for r in &requirements {
            assert_eq!((r.distance, r.face_size, r.max_archers), (25, 60, 4));
        }

        let flights = materialize_flights(&competition).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(
            flights[0].targets.iter().map(|t| t.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        competition.replace_flights(flights).unwrap();

        let flight = competition.flight(1).unwrap().clone();
        let assignments = assign_slots(&competition, &flight, false);
        assert_eq!(assignments.len(), 9);

        println!("Assignments:");
        for a in &assignments {
            println!("  archer {} -> target {} position {}", a.archer_id, a.target_number, a.position);
        }

        // Archers 1-4 on target 1 (A-D), 5-8 on target 2 (A-D), 9 on 3/A.
        use TargetPosition::{A, B, C, D};
        let expected = [
            (1, A), (1, B), (1, C), (1, D),
            (2, A), (2, B), (2, C), (2, D),
            (3, A),
        ];
        for (assignment, (target, position)) in assignments.iter().zip(expected) {
            assert_eq!(assignment.target_number, target);
            assert_eq!(assignment.position, position);
        }
    }

    #[test]
    fn test_keep_existing_is_preserving_and_idempotent() {
        let mut competition = Competition::new(indoor_info("Conservation"));
        for i in 0..3 {
            competition.add_archer(senior(&format!("Premier{}", i))).unwrap();
        }
        let flights = materialize_flights(&competition).unwrap();
        competition.replace_flights(flights).unwrap();

        let flight = competition.flight(1).unwrap().clone();
        let first_pass = assign_slots(&competition, &flight, true);
        competition.replace_assignments(1, first_pass.clone()).unwrap();

        // A newcomer arrives; earlier placements must not move.
        competition.add_archer(senior("Retardataire")).unwrap();
        let flights = materialize_flights(&competition).unwrap();
        competition.replace_flights(flights).unwrap();

        let flight = competition.flight(1).unwrap().clone();
        let second_pass = assign_slots(&competition, &flight, true);
        assert_eq!(&second_pass[..first_pass.len()], &first_pass[..]);
        assert_eq!(second_pass.len(), first_pass.len() + 1);

        // And a third run with nothing new changes nothing.
        competition.replace_assignments(1, second_pass.clone()).unwrap();
        let flight = competition.flight(1).unwrap().clone();
        let third_pass = assign_slots(&competition, &flight, true);
        assert_eq!(third_pass, second_pass);
    }

    #[test]
    fn test_setup_to_rankings_workflow() {
        let mut state = AppState::new();
        let id = state.create_competition(indoor_info("Championnat"));
        let competition = state.require_competition_mut(id).unwrap();

        let mut ids = Vec::new();
        for name in ["Martin", "Durand", "Petit"] {
            ids.push(competition.add_archer(senior(name)).unwrap());
        }
        let mut minime = senior("Moreau");
        minime.age_category = AgeCategoryCode::M;
        minime.birth_year = 2012;
        let minime_id = competition.add_archer(minime).unwrap();

        let flights = materialize_flights(competition).unwrap();
        competition.replace_flights(flights).unwrap();
        let flight = competition.flight(1).unwrap().clone();
        let assignments = assign_slots(competition, &flight, false);
        assert!(unassigned_archers(competition, &flight).is_empty());
        competition.replace_assignments(1, assignments.clone()).unwrap();

        competition.set_status(CompetitionStatus::Active);
        for archer_id in ids.iter().chain([&minime_id]) {
            competition.set_archer_presence(*archer_id, true).unwrap();
        }

        // Everyone gets a sheet for their slot.
        for a in &assignments {
            competition
                .get_or_create_score(a.archer_id, a.flight_id, a.target_number, a.position)
                .unwrap();
        }

        // Martin shoots three arrows; Durand's sheet is entered per round.
        let martin = assignments.iter().find(|a| a.archer_id == ids[0]).unwrap();
        competition
            .record_arrow(ids[0], martin.flight_id, martin.target_number, 1, 0, 0, 10)
            .unwrap();
        competition
            .record_arrow(ids[0], martin.flight_id, martin.target_number, 1, 0, 1, 9)
            .unwrap();
        competition
            .record_arrow(ids[0], martin.flight_id, martin.target_number, 1, 0, 2, 8)
            .unwrap();

        let durand = assignments.iter().find(|a| a.archer_id == ids[1]).unwrap();
        competition
            .set_round_total(ids[1], durand.flight_id, durand.target_number, 1, 280)
            .unwrap();
        competition
            .set_round_total(ids[1], durand.flight_id, durand.target_number, 2, 266)
            .unwrap();

        competition.set_status(CompetitionStatus::Completed);
        assert!(competition.can_view_rankings());

        let rankings = compute_rankings(state.competition(id).unwrap());
        println!("Rankings:");
        for category in &rankings {
            println!("  {}:", category.code);
            for row in &category.archers {
                println!("    {}. {} ({} pts)", row.rank, row.last_name, row.total);
            }
        }

        // Minimes before seniors, federation order.
        assert_eq!(rankings[0].code, "MMAV");
        assert_eq!(rankings[1].code, "SMAV");
        let seniors = &rankings[1].archers;
        assert_eq!(seniors[0].last_name, "Durand");
        assert_eq!(seniors[0].total, 546);
        assert_eq!(seniors[1].last_name, "Martin");
        assert_eq!(seniors[1].total, 27);
        assert_eq!(seniors[2].last_name, "Petit");
        assert_eq!(seniors[2].total, 0);
    }

    #[test]
    fn test_snapshot_roundtrip_and_schema() {
        let mut competition = Competition::new(indoor_info("Snapshot"));
        competition.add_archer(senior("Martin")).unwrap();
        let flights = materialize_flights(&competition).unwrap();
        competition.replace_flights(flights).unwrap();

        let json = competition.to_json_pretty().unwrap();
        let restored = Competition::from_json(&json).unwrap();
        assert_eq!(restored, competition);

        let schema = serde_json::to_value(Competition::json_schema()).unwrap();
        assert_eq!(schema["title"], "Competition");
        println!("Snapshot is {} bytes, schema title {}", json.len(), schema["title"]);
    }
}

//! Competition rankings.
//!
//! Pure function over a competition snapshot: archers holding at least one
//! score sheet are grouped by competition category code and ordered inside
//! each group by total, then tens, nines and eights. Category blocks follow
//! the federation table order.

use tracing::debug;

use crate::data::embedded::{category_table_index, find_category_code};
use crate::models::competition::Competition;
use crate::models::ranking::{RankedArcher, RankingCategory};

/// Rank every archer with at least one recorded sheet.
///
/// The category code stored on the archer wins; an absent or empty one is
/// derived from (age, bow, gender). Archers whose combination has no
/// category are left out.
pub fn compute_rankings(competition: &Competition) -> Vec<RankingCategory> {
    let mut buckets: Vec<(String, Vec<RankedArcher>)> = Vec::new();

    for archer in &competition.archers {
        let mut total = 0u32;
        let mut tens = 0u32;
        let mut nines = 0u32;
        let mut eights = 0u32;
        let mut has_score = false;
        for score in competition.scores.iter().filter(|s| s.archer_id == archer.id) {
            has_score = true;
            total += score.total;
            tens += score.tens;
            nines += score.nines;
            eights += score.eights;
        }
        if !has_score {
            continue;
        }

        let code = archer
            .category
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(str::to_owned)
            .or_else(|| {
                find_category_code(archer.age_category, archer.bow_type, archer.gender)
                    .map(str::to_owned)
            });
        let Some(code) = code else {
            debug!("Archer {} resolves to no category; left out of rankings", archer.id);
            continue;
        };

        let row = RankedArcher {
            archer_id: archer.id,
            last_name: archer.last_name.clone(),
            first_name: archer.first_name.clone(),
            club: archer.club.clone(),
            rank: 0,
            total,
            tens,
            nines,
            eights,
        };
        match buckets.iter_mut().find(|(existing, _)| *existing == code) {
            Some((_, rows)) => rows.push(row),
            None => buckets.push((code, vec![row])),
        }
    }

    // Federation table order; codes outside the table close the list in
    // first-seen order.
    buckets.sort_by_key(|(code, _)| category_table_index(code).unwrap_or(usize::MAX));

    buckets
        .into_iter()
        .map(|(code, mut rows)| {
            rows.sort_by(|a, b| {
                (b.total, b.tens, b.nines, b.eights).cmp(&(a.total, a.tens, a.nines, a.eights))
            });
            for (index, row) in rows.iter_mut().enumerate() {
                row.rank = index as u32 + 1;
            }
            RankingCategory { code, archers: rows }
        })
        .collect()
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::models::archer::Archer;
    use crate::models::category::{AgeCategoryCode, BowTypeCode, CompetitionType, Gender};
    use crate::models::competition::CompetitionInfo;
    use crate::models::flight::TargetPosition;
    use crate::models::score::ArcherScore;

    fn competition() -> Competition {
        Competition::new(CompetitionInfo {
            name: "Test".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            location: "Grenoble".to_string(),
            competition_type: CompetitionType::Indoor,
            organizing_club: "Club".to_string(),
            arbitrator_name: "Arbitre".to_string(),
            number_of_targets: 4,
            number_of_flights: 1,
            default_max_archers: None,
            target_limit_rules: Vec::new(),
        })
    }

    fn archer(last_name: &str, age_category: AgeCategoryCode) -> Archer {
        Archer {
            id: Uuid::new_v4(),
            last_name: last_name.to_string(),
            first_name: "Test".to_string(),
            club: "Club".to_string(),
            department_number: 38,
            birth_year: 1990,
            age_category,
            bow_type: BowTypeCode::AV,
            gender: Gender::M,
            category: None,
            license: "555555E".to_string(),
            flight_id: None,
            is_beginner: false,
            is_disabled: false,
            is_visually_impaired: false,
            is_present: true,
        }
    }

    fn sheet(archer_id: Uuid, target_number: u32, total: u32, tens: u32, nines: u32) -> ArcherScore {
        let mut score = ArcherScore::new(archer_id, 1, target_number, TargetPosition::A);
        score.total = total;
        score.tens = tens;
        score.nines = nines;
        score
    }

    #[test]
    fn orders_by_total_then_counts() {
        let mut c = competition();
        let first = archer("Premier", AgeCategoryCode::S);
        let second = archer("Deuxième", AgeCategoryCode::S);
        let third = archer("Troisième", AgeCategoryCode::S);
        c.scores.push(sheet(first.id, 1, 500, 10, 4));
        c.scores.push(sheet(second.id, 2, 550, 2, 1));
        // Same total as the first, more tens: ranks above them.
        c.scores.push(sheet(third.id, 3, 500, 12, 0));
        c.archers.extend([first, second, third]);

        let rankings = compute_rankings(&c);
        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].code, "SMAV");
        let names: Vec<_> =
            rankings[0].archers.iter().map(|r| r.last_name.as_str()).collect();
        assert_eq!(names, vec!["Deuxième", "Troisième", "Premier"]);
        assert_eq!(
            rankings[0].archers.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn archers_without_sheets_are_left_out() {
        let mut c = competition();
        let scored = archer("Avec", AgeCategoryCode::S);
        let unscored = archer("Sans", AgeCategoryCode::S);
        c.scores.push(sheet(scored.id, 1, 300, 5, 5));
        c.archers.extend([scored, unscored]);

        let rankings = compute_rankings(&c);
        assert_eq!(rankings[0].archers.len(), 1);
        assert_eq!(rankings[0].archers[0].last_name, "Avec");
    }

    #[test]
    fn multiple_sheets_sum_per_archer() {
        let mut c = competition();
        let a = archer("Double", AgeCategoryCode::S);
        c.scores.push(sheet(a.id, 1, 100, 1, 2));
        c.scores.push(sheet(a.id, 2, 150, 3, 0));
        c.archers.push(a);

        let rankings = compute_rankings(&c);
        let row = &rankings[0].archers[0];
        assert_eq!(row.total, 250);
        assert_eq!(row.tens, 4);
        assert_eq!(row.nines, 2);
    }

    #[test]
    fn stored_category_wins_over_derivation() {
        let mut c = competition();
        let mut a = archer("Classé", AgeCategoryCode::S);
        a.category = Some("VMAV".to_string());
        c.scores.push(sheet(a.id, 1, 400, 0, 0));
        c.archers.push(a);

        let rankings = compute_rankings(&c);
        assert_eq!(rankings[0].code, "VMAV");
    }

    #[test]
    fn empty_stored_category_falls_back_to_derivation() {
        let mut c = competition();
        let mut a = archer("Vide", AgeCategoryCode::S);
        a.category = Some(String::new());
        c.scores.push(sheet(a.id, 1, 400, 0, 0));
        c.archers.push(a);

        let rankings = compute_rankings(&c);
        assert_eq!(rankings[0].code, "SMAV");
    }

    #[test]
    fn categories_follow_the_table_order() {
        let mut c = competition();
        let senior = archer("Senior", AgeCategoryCode::S);
        let minime = archer("Minime", AgeCategoryCode::M);
        c.scores.push(sheet(senior.id, 1, 500, 0, 0));
        c.scores.push(sheet(minime.id, 2, 200, 0, 0));
        c.archers.extend([senior, minime]);

        let rankings = compute_rankings(&c);
        // Minimes come before seniors in the federation table, whatever
        // the totals say.
        assert_eq!(
            rankings.iter().map(|r| r.code.as_str()).collect::<Vec<_>>(),
            vec!["MMAV", "SMAV"]
        );
    }

    #[test]
    fn unknown_codes_rank_last() {
        let mut c = competition();
        let known = archer("Connu", AgeCategoryCode::S);
        let mut unknown = archer("Inconnu", AgeCategoryCode::S);
        unknown.category = Some("HORS".to_string());
        c.scores.push(sheet(unknown.id, 1, 600, 0, 0));
        c.scores.push(sheet(known.id, 2, 100, 0, 0));
        c.archers.extend([unknown, known]);

        let rankings = compute_rankings(&c);
        assert_eq!(
            rankings.iter().map(|r| r.code.as_str()).collect::<Vec<_>>(),
            vec!["SMAV", "HORS"]
        );
    }

    #[test]
    fn unresolvable_categories_are_skipped() {
        let mut c = competition();
        // Poussin compound has no category row.
        let mut a = archer("Sans catégorie", AgeCategoryCode::P);
        a.bow_type = BowTypeCode::COAV;
        c.scores.push(sheet(a.id, 1, 100, 0, 0));
        c.archers.push(a);

        assert!(compute_rankings(&c).is_empty());
    }
}

//! Roster grouping helpers shared by the engine stages.

use crate::models::archer::Archer;
use crate::models::category::{AgeCategoryCode, BowTypeCode};

/// Group archers by their (bow, age) class, first-seen order preserved both
/// across groups and inside each group.
pub fn group_by_spec_key<'a>(
    archers: &[&'a Archer],
) -> Vec<((BowTypeCode, AgeCategoryCode), Vec<&'a Archer>)> {
    let mut groups: Vec<((BowTypeCode, AgeCategoryCode), Vec<&'a Archer>)> = Vec::new();
    for &archer in archers {
        let key = archer.spec_key();
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(archer),
            None => groups.push((key, vec![archer])),
        }
    }
    groups
}

/// Split a slice into `group_count` contiguous chunks whose sizes differ by
/// at most one, larger chunks first. Zero groups yields nothing.
pub fn to_balanced_groups<T>(items: &[T], group_count: usize) -> Vec<&[T]> {
    if group_count == 0 {
        return Vec::new();
    }
    let base = items.len() / group_count;
    let remainder = items.len() % group_count;
    let mut groups = Vec::with_capacity(group_count);
    let mut start = 0;
    for index in 0..group_count {
        let size = base + usize::from(index < remainder);
        groups.push(&items[start..start + size]);
        start += size;
    }
    groups
}

//! Standings aggregation with grouped, fully deterministic tie-breaks.

use std::collections::HashMap;

use crate::models::{Match, PlayerId, StandingsRow, Team};

/// Sorted member ids of one side: the identity a side accumulates under, so
/// [a, b] and [b, a] are the same pair.
fn side_key(team: &[PlayerId]) -> Vec<PlayerId> {
    let mut key = team.to_vec();
    key.sort();
    key
}

/// Aggregate a filtered match set into ranked standings rows.
///
/// 1. Accumulate wins, losses and rally points per sorted-id side. Void
///    matches contribute nothing.
/// 2. Rank by wins descending.
/// 3. Resolve each group of equal-wins rows, in order: head-to-head wins in
///    matches played inside the group, point differential, points scored,
///    then the members key itself so output never depends on input order.
pub fn compute_standings(matches: &[&Match]) -> Vec<StandingsRow> {
    let mut rows: HashMap<Vec<PlayerId>, StandingsRow> = HashMap::new();

    for m in matches {
        if m.is_void() {
            continue;
        }
        let Some(winner) = m.winner() else { continue };
        for side in [Team::One, Team::Two] {
            let key = side_key(m.team(side));
            let row = rows
                .entry(key.clone())
                .or_insert_with(|| StandingsRow::new(key));
            if side == winner {
                row.wins += 1;
            } else {
                row.losses += 1;
            }
            row.points_scored += m.score(side) as i64;
            row.points_conceded += m.score(side.other()) as i64;
        }
    }

    let mut ranked: Vec<StandingsRow> = rows.into_values().collect();
    // Canonical base order first; the stable sort by wins keeps it inside
    // every tied group until the group is re-ordered below.
    ranked.sort_by(|a, b| a.members.cmp(&b.members));
    ranked.sort_by(|a, b| b.wins.cmp(&a.wins));

    let mut start = 0;
    while start < ranked.len() {
        let mut end = start + 1;
        while end < ranked.len() && ranked[end].wins == ranked[start].wins {
            end += 1;
        }
        if end - start > 1 {
            order_tied_group(&mut ranked[start..end], matches);
        }
        start = end;
    }
    ranked
}

/// Re-order one equal-wins group. Head-to-head counts only wins from matches
/// where both sides belong to the group.
fn order_tied_group(group: &mut [StandingsRow], matches: &[&Match]) {
    let mut head_to_head: HashMap<Vec<PlayerId>, u32> =
        group.iter().map(|row| (row.members.clone(), 0)).collect();

    for m in matches {
        if m.is_void() {
            continue;
        }
        let Some(winner) = m.winner() else { continue };
        let key_1 = side_key(&m.team_1);
        let key_2 = side_key(&m.team_2);
        if !head_to_head.contains_key(&key_1) || !head_to_head.contains_key(&key_2) {
            continue;
        }
        let winner_key = match winner {
            Team::One => key_1,
            Team::Two => key_2,
        };
        if let Some(count) = head_to_head.get_mut(&winner_key) {
            *count += 1;
        }
    }

    group.sort_by(|a, b| {
        let h2h_a = head_to_head.get(&a.members).copied().unwrap_or(0);
        let h2h_b = head_to_head.get(&b.members).copied().unwrap_or(0);
        h2h_b
            .cmp(&h2h_a)
            .then_with(|| b.point_diff().cmp(&a.point_diff()))
            .then_with(|| b.points_scored.cmp(&a.points_scored))
            .then_with(|| a.members.cmp(&b.members))
    });
}

//! Monthly placement bonuses awarded when a tournament month closes.

use std::collections::HashMap;

use log::debug;

use crate::logic::eras::select_rating_rule;
use crate::logic::standings::compute_standings;
use crate::logic::{rating_of, round2, RatingMap, RATING_CEILING, RATING_FLOOR};
use crate::models::{Match, MonthKey, Player, PlayerId};

/// Baseline bonus per podium place before field-size scaling.
const BASE_BONUS: [f64; 3] = [0.10, 0.07, 0.05];
/// Ceiling on any single placement bonus.
const MAX_BONUS: f64 = 0.15;

/// Close one month of tournament play and award its placement bonuses.
///
/// Standings come from that month's tournament matches alone. A month with
/// fewer than 3 ranked sides awards nothing at all. Bonuses scale with the
/// field: 10% more per ranked side above five, 10% less per side below.
///
/// The rating bonus goes to every member of the top 3 sides whenever the
/// month falls in rated history, whichever rating rule governed its matches.
/// A championship goes to every member of the 1st-place side with no era
/// gate: titles predate rating.
pub fn apply_monthly_bonuses(
    month: MonthKey,
    matches: &[&Match],
    players: &mut HashMap<PlayerId, Player>,
    ratings: &mut RatingMap,
) {
    let standings = compute_standings(matches);
    if standings.len() < 3 {
        return;
    }

    let rated_month = matches
        .iter()
        .any(|m| select_rating_rule(m.played_at).points_eligible);
    let scale = 1.0 + 0.10 * (standings.len() as f64 - 5.0);
    debug!(
        "month {}: closing with {} ranked sides, scale {:.2}, rated {}",
        month,
        standings.len(),
        scale,
        rated_month
    );

    for (place, row) in standings.iter().take(3).enumerate() {
        let bonus = round2(BASE_BONUS[place] * scale).min(MAX_BONUS);
        if rated_month {
            for id in &row.members {
                let rating = rating_of(ratings, id);
                ratings.insert(
                    id.clone(),
                    round2((rating + bonus).clamp(RATING_FLOOR, RATING_CEILING)),
                );
            }
            debug!(
                "month {}: place {} bonus +{:.2} to {:?}",
                month,
                place + 1,
                bonus,
                row.members
            );
        }
        if place == 0 {
            for id in &row.members {
                if let Some(player) = players.get_mut(id) {
                    player.award_championship();
                }
            }
        }
    }
}

//! Fixed-step ladder rule, the league's first rated era.

use crate::logic::{rating_of, round2, RatingMap, RATING_CEILING, RATING_FLOOR};
use crate::models::{PlayerId, Team};

/// Step every participant's rating moves per ladder-era match.
pub const LADDER_STEP: f64 = 0.1;

/// Winners step up toward the ceiling, losers step down toward the floor. A
/// loser already at or below the floor keeps its value instead of being
/// re-clamped, so floor-sitters do not oscillate. Every write is rounded to
/// 2 decimals.
pub fn apply_ladder_update(
    team_1: &[PlayerId],
    team_2: &[PlayerId],
    winner: Team,
    ratings: &mut RatingMap,
) {
    let (winners, losers) = match winner {
        Team::One => (team_1, team_2),
        Team::Two => (team_2, team_1),
    };
    for id in winners {
        let rating = rating_of(ratings, id);
        ratings.insert(id.clone(), round2((rating + LADDER_STEP).min(RATING_CEILING)));
    }
    for id in losers {
        let rating = rating_of(ratings, id);
        if rating > RATING_FLOOR {
            ratings.insert(id.clone(), round2((rating - LADDER_STEP).max(RATING_FLOOR)));
        }
    }
}

//! League business logic: rating rules, standings, bonuses, replay, scheduling.

mod bonus;
mod eras;
mod history;
mod ladder;
mod logistic;
mod replay;
mod scheduling;
mod standings;

pub use bonus::apply_monthly_bonuses;
pub use eras::{select_rating_rule, RatingEra, RuleSchedule, RuleSelection};
pub use history::{
    daily_rating_history, match_rating_details, DailyRatingSnapshot, MatchRatingDetails,
};
pub use ladder::{apply_ladder_update, LADDER_STEP};
pub use logistic::{apply_logistic_update, LogisticBreakdown, MemberChange};
pub use replay::calculate_player_stats;
pub use scheduling::{balanced_doubles_teams, round_robin_pairings, DoublesTeam};
pub use standings::compute_standings;

use std::collections::HashMap;

use crate::models::{PlayerId, DEFAULT_RATING};

/// Working skill-rating state keyed by player id.
pub type RatingMap = HashMap<PlayerId, f64>;

/// Floor of the rating scale.
pub const RATING_FLOOR: f64 = 2.0;
/// Ceiling of the rating scale.
pub const RATING_CEILING: f64 = 6.0;

/// Round to 2 decimals. Every rating write passes through this, so replayed
/// histories read rounded intermediate values instead of accumulating float
/// drift over thousands of matches.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Rating as the rules see it: the working map entry, or the default for a
/// player who has not been rated yet.
pub(crate) fn rating_of(ratings: &RatingMap, id: &str) -> f64 {
    ratings.get(id).copied().unwrap_or(DEFAULT_RATING)
}

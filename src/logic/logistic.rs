//! Logistic expected-outcome rule with partner-weighted change distribution.

use serde::Serialize;

use crate::logic::{rating_of, round2, RatingMap, RATING_CEILING, RATING_FLOOR};
use crate::models::PlayerId;

/// Spread of the expected-outcome curve.
pub const TAU: f64 = 0.45;
/// Weight of the score-margin term.
pub const ALPHA: f64 = 0.55;
/// Rally points in a standard game, used to normalize the margin.
pub const WIN_SCORE: f64 = 11.0;
/// Base step for a full upset.
pub const K: f64 = 0.18;
/// Sharpness of the partner weighting.
pub const BETA: f64 = 1.4;
/// Hard cap on any single member's change in one match.
pub const MAX_CHANGE: f64 = 0.14;

/// One member's slice of a team-level rating change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberChange {
    pub player: PlayerId,
    /// Share of the team change this member carries (1.0 in singles).
    pub share: f64,
    /// Change actually applied, after the share and the per-match cap.
    pub change: f64,
    pub old_rating: f64,
    pub new_rating: f64,
}

/// Everything the logistic rule computed for one match. The match-detail
/// endpoint serves this struct verbatim, so the explanation always agrees
/// with what the replay applied.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogisticBreakdown {
    /// Average pre-match rating of team 1.
    pub team_1_rating: f64,
    /// Average pre-match rating of team 2.
    pub team_2_rating: f64,
    /// Expected probability of team 1 winning.
    pub expected_1: f64,
    /// Score-margin multiplier, clamped to [0.85, 1.20].
    pub margin_factor: f64,
    pub team_change_1: f64,
    /// Exactly the negation of `team_change_1`: the rule is zero-sum at the
    /// team level.
    pub team_change_2: f64,
    pub team_1_members: Vec<MemberChange>,
    pub team_2_members: Vec<MemberChange>,
}

/// Compute the full logistic update from pre-match ratings without applying
/// it. Every input is read as it stood before the match, so no member's
/// result depends on another member's post-match value.
pub fn evaluate(
    team_1: &[(PlayerId, f64)],
    team_2: &[(PlayerId, f64)],
    score_1: i32,
    score_2: i32,
) -> LogisticBreakdown {
    let team_1_rating = team_average(team_1);
    let team_2_rating = team_average(team_2);
    let expected_1 = 1.0 / (1.0 + (-(team_1_rating - team_2_rating) / TAU).exp());
    let result_1 = if score_1 > score_2 { 1.0 } else { 0.0 };
    let margin_factor = margin_factor(score_1, score_2);
    let team_change_1 = K * (result_1 - expected_1) * margin_factor;
    let team_change_2 = -team_change_1;

    LogisticBreakdown {
        team_1_rating,
        team_2_rating,
        expected_1,
        margin_factor,
        team_change_1,
        team_change_2,
        team_1_members: distribute(team_1, team_1_rating, team_change_1),
        team_2_members: distribute(team_2, team_2_rating, team_change_2),
    }
}

/// Apply the logistic rule for one match, writing new ratings back into the
/// working map, and return the breakdown that was applied.
pub fn apply_logistic_update(
    team_1: &[PlayerId],
    team_2: &[PlayerId],
    score_1: i32,
    score_2: i32,
    ratings: &mut RatingMap,
) -> LogisticBreakdown {
    let resolved_1 = resolve(team_1, ratings);
    let resolved_2 = resolve(team_2, ratings);
    let breakdown = evaluate(&resolved_1, &resolved_2, score_1, score_2);
    for member in breakdown.team_1_members.iter().chain(&breakdown.team_2_members) {
        ratings.insert(member.player.clone(), member.new_rating);
    }
    breakdown
}

/// Pre-match rating lookup for one whole side.
pub(crate) fn resolve(team: &[PlayerId], ratings: &RatingMap) -> Vec<(PlayerId, f64)> {
    team.iter()
        .map(|id| (id.clone(), rating_of(ratings, id)))
        .collect()
}

fn team_average(team: &[(PlayerId, f64)]) -> f64 {
    team.iter().map(|(_, rating)| rating).sum::<f64>() / team.len() as f64
}

/// Margin multiplier: lopsided scores move ratings more, narrow ones less.
fn margin_factor(score_1: i32, score_2: i32) -> f64 {
    let margin = (score_1 - score_2).abs() as f64;
    (1.0 + ALPHA * (margin / WIN_SCORE - 0.25)).clamp(0.85, 1.20)
}

/// Split one team's change across its members. The member sitting below the
/// team average carries the larger share, whichever direction the change
/// points; a singles player carries all of it.
fn distribute(team: &[(PlayerId, f64)], team_avg: f64, team_change: f64) -> Vec<MemberChange> {
    let weights: Vec<f64> = team
        .iter()
        .map(|(_, rating)| (-BETA * (rating - team_avg)).exp())
        .collect();
    let total: f64 = weights.iter().sum();

    team.iter()
        .zip(&weights)
        .map(|((id, old_rating), weight)| {
            let share = weight / total;
            let change = (share * team_change).clamp(-MAX_CHANGE, MAX_CHANGE);
            let new_rating = round2((old_rating + change).clamp(RATING_FLOOR, RATING_CEILING));
            MemberChange {
                player: id.clone(),
                share,
                change,
                old_rating: *old_rating,
                new_rating,
            }
        })
        .collect()
}

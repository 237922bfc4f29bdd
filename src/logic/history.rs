//! Time-series and single-match views over the same replay rules.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::logic::eras::{select_rating_rule, RatingEra};
use crate::logic::replay::{chronological, Replay};
use crate::logic::{logistic, rating_of, LogisticBreakdown, RatingMap};
use crate::models::{Match, MatchId, Player, PlayerId};

/// Every player's rating as it stood after one calendar day's matches.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyRatingSnapshot {
    pub date: NaiveDate,
    pub ratings: BTreeMap<PlayerId, f64>,
}

/// Rating state after each calendar day that had at least one non-void
/// match, in date order. Mid-history month closings (and their bonuses) land
/// in the snapshots; the final month stays open, exactly as the career
/// replay would see it before its last flush.
pub fn daily_rating_history(players: &[Player], matches: &[Match]) -> Vec<DailyRatingSnapshot> {
    let mut replay = Replay::new(players);
    let mut snapshots = Vec::new();
    let mut open_day: Option<NaiveDate> = None;

    for m in chronological(matches) {
        if m.is_void() {
            continue;
        }
        let day = m.played_at.date_naive();
        if let Some(open) = open_day {
            if open != day {
                snapshots.push(snapshot_of(open, &replay.ratings));
            }
        }
        replay.apply(m);
        open_day = Some(day);
    }
    if let Some(open) = open_day {
        snapshots.push(snapshot_of(open, &replay.ratings));
    }
    snapshots
}

fn snapshot_of(date: NaiveDate, ratings: &RatingMap) -> DailyRatingSnapshot {
    DailyRatingSnapshot {
        date,
        ratings: ratings
            .iter()
            .map(|(id, rating)| (id.clone(), *rating))
            .collect(),
    }
}

/// Why one match moved ratings the way it did: the era in force, every
/// participant's rating immediately before the match, and the full logistic
/// breakdown when that rule governed it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchRatingDetails {
    pub match_id: MatchId,
    pub era: RatingEra,
    pub points_eligible: bool,
    pub void: bool,
    /// Each participant's rating just before the match.
    pub pre_ratings: BTreeMap<PlayerId, f64>,
    /// Present only for non-void matches under the logistic rule.
    pub breakdown: Option<LogisticBreakdown>,
}

/// Replay history strictly up to (not including) the target match and report
/// the update that applies to it. `None` only when the id is unknown; void
/// and pre-rating-era matches still get a (breakdown-free) report.
pub fn match_rating_details(
    match_id: &str,
    players: &[Player],
    matches: &[Match],
) -> Option<MatchRatingDetails> {
    let ordered = chronological(matches);
    let position = ordered.iter().position(|m| m.id == match_id)?;
    let target = ordered[position];

    let mut replay = Replay::new(players);
    for m in &ordered[..position] {
        replay.apply(m);
    }
    // The career replay closes a pending month before the first match of the
    // next one touches state; mirror that so pre-match ratings include any
    // bonus flushed right before the target.
    if !target.is_void() {
        replay.close_month_before(target.month());
    }

    let selection = select_rating_rule(target.played_at);
    let pre_ratings: BTreeMap<PlayerId, f64> = target
        .participants()
        .map(|id| (id.clone(), rating_of(&replay.ratings, id)))
        .collect();
    let breakdown = if selection.era == RatingEra::Logistic && !target.is_void() {
        Some(logistic::evaluate(
            &logistic::resolve(&target.team_1, &replay.ratings),
            &logistic::resolve(&target.team_2, &replay.ratings),
            target.score_1,
            target.score_2,
        ))
    } else {
        None
    };

    Some(MatchRatingDetails {
        match_id: target.id.clone(),
        era: selection.era,
        points_eligible: selection.points_eligible,
        void: target.is_void(),
        pre_ratings,
        breakdown,
    })
}

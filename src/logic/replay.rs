//! Full-history replay, the single authoritative statistics computation.

use std::collections::HashMap;

use log::warn;

use crate::logic::eras::{select_rating_rule, RatingEra};
use crate::logic::{ladder, logistic, RatingMap};
use crate::models::{Match, MatchKind, MonthKey, Player, PlayerId, Team};

/// Replay order: by timestamp, then by id, so equal-timestamp matches replay
/// identically whatever order they were stored in.
pub(crate) fn chronological(matches: &[Match]) -> Vec<&Match> {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by(|a, b| a.played_at.cmp(&b.played_at).then_with(|| a.id.cmp(&b.id)));
    ordered
}

/// Stepper that owns the per-match rules. Every replayer (career totals, the
/// daily series, the match-detail view) walks matches through this one
/// implementation so they can never disagree.
pub(crate) struct Replay<'a> {
    players: HashMap<PlayerId, Player>,
    pub(crate) ratings: RatingMap,
    month: Option<MonthKey>,
    month_matches: Vec<&'a Match>,
}

impl<'a> Replay<'a> {
    /// Fresh replay state: derived fields zeroed, every rating back at the
    /// default. Stored snapshots are caches, never inputs.
    pub(crate) fn new(players: &[Player]) -> Self {
        let mut reset = HashMap::with_capacity(players.len());
        let mut ratings = RatingMap::with_capacity(players.len());
        for player in players {
            let mut player = player.clone();
            player.reset_derived();
            ratings.insert(player.id.clone(), player.rating);
            reset.insert(player.id.clone(), player);
        }
        Self {
            players: reset,
            ratings,
            month: None,
            month_matches: Vec::new(),
        }
    }

    /// Close the open month if `next` starts a new one. The orchestrator and
    /// the match-detail view both call this before the first match of a
    /// month touches any state.
    pub(crate) fn close_month_before(&mut self, next: MonthKey) {
        if let Some(open) = self.month {
            if open != next {
                self.flush_month();
            }
        }
        self.month = Some(next);
    }

    /// Apply one match: month rollover, per-player stats, wagering ledger,
    /// then the era's rating rule. Void matches are skipped entirely and
    /// leave every piece of state untouched.
    pub(crate) fn apply(&mut self, m: &'a Match) {
        if m.is_void() {
            return;
        }
        let Some(winner) = m.winner() else { return };
        self.close_month_before(m.month());

        let selection = select_rating_rule(m.played_at);

        for side in [Team::One, Team::Two] {
            let scored = m.score(side) as i64;
            let conceded = m.score(side.other()) as i64;
            let won = side == winner;
            for id in m.team(side) {
                let Some(player) = self.players.get_mut(id) else {
                    warn!("match {}: unknown player {} skipped", m.id, id);
                    continue;
                };
                if won {
                    player.add_win(scored, conceded);
                } else {
                    player.add_loss(scored, conceded);
                }
                if selection.points_eligible && m.kind == MatchKind::Wagering {
                    player.apply_stake(if won { m.stake } else { -m.stake });
                }
            }
        }

        match selection.era {
            RatingEra::Ladder => {
                ladder::apply_ladder_update(&m.team_1, &m.team_2, winner, &mut self.ratings);
            }
            RatingEra::Logistic => {
                logistic::apply_logistic_update(
                    &m.team_1,
                    &m.team_2,
                    m.score_1,
                    m.score_2,
                    &mut self.ratings,
                );
            }
            RatingEra::Unrated => {}
        }

        if m.kind == MatchKind::Tournament {
            self.month_matches.push(m);
        }
    }

    fn flush_month(&mut self) {
        if let Some(month) = self.month {
            super::bonus::apply_monthly_bonuses(
                month,
                &self.month_matches,
                &mut self.players,
                &mut self.ratings,
            );
        }
        self.month_matches.clear();
    }

    /// Close the final open month and fold the working ratings back into the
    /// player records.
    pub(crate) fn finish(mut self) -> HashMap<PlayerId, Player> {
        self.flush_month();
        for (id, rating) in &self.ratings {
            if let Some(player) = self.players.get_mut(id) {
                player.rating = *rating;
            }
        }
        self.players
    }
}

/// Recompute every player's derived statistics from the full match history.
///
/// 1. Reset all derived fields (ledger at zero, rating at the default).
/// 2. Walk the matches in chronological order through the rule stepper.
/// 3. Close each tournament month as it passes, awarding placement bonuses.
/// 4. Close the final month and return the players in their input order.
///
/// Inputs are never mutated. The same players and matches produce the same
/// output whatever order the matches arrive in, so every read path re-derives
/// identical state.
pub fn calculate_player_stats(players: &[Player], matches: &[Match]) -> Vec<Player> {
    let mut replay = Replay::new(players);
    for m in chronological(matches) {
        replay.apply(m);
    }
    let mut enriched = replay.finish();
    players
        .iter()
        .filter_map(|player| enriched.remove(&player.id))
        .collect()
}

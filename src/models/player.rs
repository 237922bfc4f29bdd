//! Player data: persisted seed fields plus replay-derived statistics.

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use uuid::Uuid;

/// Unique identifier for a player (opaque string; new players get a UUID,
/// imported legacy records keep whatever id they carried).
pub type PlayerId = String;

/// Skill rating every player starts from when a replay resets state. The
/// legacy wagering seed never feeds the rating rules.
pub const DEFAULT_RATING: f64 = 3.0;

/// Wagering seed for players created without one.
pub const DEFAULT_INITIAL_POINTS: i64 = 1000;

/// A player in the league.
///
/// Only `id`, `name`, `initial_points`, and `is_active` are source data. The
/// remaining fields are caches recomputed from scratch by every replay over
/// the match history; persisted values are overwritten, never trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Legacy wagering seed; the displayed balance is this plus the replayed
    /// ledger. Never used as a rating baseline.
    #[serde(
        default = "default_initial_points",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub initial_points: i64,
    /// Inactive players are hidden from team generation and the leaderboard;
    /// their historical matches still count in replay.
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub matches_played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub points_scored: i64,
    #[serde(default)]
    pub points_conceded: i64,
    /// Signed wagering ledger accumulated from stake-based matches.
    #[serde(default)]
    pub ranking_points: i64,
    /// Tournament skill rating on the 2.0–6.0 scale.
    #[serde(default = "default_rating")]
    pub rating: f64,
    /// Monthly tournament wins (1st-place pair memberships).
    #[serde(default)]
    pub championships: u32,
}

fn default_true() -> bool {
    true
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

fn default_initial_points() -> i64 {
    DEFAULT_INITIAL_POINTS
}

impl Player {
    /// Create a new active player with the given name and default seeds.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            initial_points: DEFAULT_INITIAL_POINTS,
            is_active: true,
            matches_played: 0,
            wins: 0,
            losses: 0,
            points_scored: 0,
            points_conceded: 0,
            ranking_points: 0,
            rating: DEFAULT_RATING,
            championships: 0,
        }
    }

    /// Zero every derived field ahead of a replay. The rating baseline is the
    /// fixed default, not the wagering seed.
    pub fn reset_derived(&mut self) {
        self.matches_played = 0;
        self.wins = 0;
        self.losses = 0;
        self.points_scored = 0;
        self.points_conceded = 0;
        self.ranking_points = 0;
        self.rating = DEFAULT_RATING;
        self.championships = 0;
    }

    /// Record a won match with this player's side scores.
    pub fn add_win(&mut self, scored: i64, conceded: i64) {
        self.matches_played += 1;
        self.wins += 1;
        self.points_scored += scored;
        self.points_conceded += conceded;
    }

    /// Record a lost match with this player's side scores.
    pub fn add_loss(&mut self, scored: i64, conceded: i64) {
        self.matches_played += 1;
        self.losses += 1;
        self.points_scored += scored;
        self.points_conceded += conceded;
    }

    /// Move the wagering ledger by a signed stake.
    pub fn apply_stake(&mut self, delta: i64) {
        self.ranking_points += delta;
    }

    /// Credit a monthly 1st-place finish.
    pub fn award_championship(&mut self) {
        self.championships += 1;
    }

    /// Displayed wagering balance: seed plus replayed ledger.
    pub fn wagering_balance(&self) -> i64 {
        self.initial_points + self.ranking_points
    }
}

//! Match record, Team side discriminant, MatchKind, and MonthKey.

use crate::models::player::PlayerId;
use chrono::{DateTime, Datelike, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use uuid::Uuid;

/// Unique identifier for a match (opaque string; new matches get a UUID,
/// imported legacy records keep whatever id they carried).
pub type MatchId = String;

/// Default wagering stake when a match record carries none.
pub const DEFAULT_STAKE: i64 = 50;

/// Which side of a match (team 1 or team 2).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    One,
    Two,
}

impl Team {
    /// The opposing side.
    pub fn other(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

/// Play type of a match: stake-based wagering play or tournament play.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Wagering,
    Tournament,
}

/// A single recorded match: two sides of 1 (singles) or 2 (doubles) players.
///
/// A match with equal scores is *void*: it contributes to no statistics, no
/// ledger movement, and no rating change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub kind: MatchKind,
    /// When the match was played; drives chronological replay order and
    /// rating-era selection.
    pub played_at: DateTime<Utc>,
    /// Side 1 player ids (1 for singles, 2 for doubles).
    pub team_1: Vec<PlayerId>,
    /// Side 2 player ids.
    pub team_2: Vec<PlayerId>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub score_1: i32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub score_2: i32,
    /// Legacy stored winner. Only consulted when scores are equal, which void
    /// handling filters out upstream; kept as a defensive fallback.
    #[serde(default)]
    pub winner_hint: Option<Team>,
    /// Wagering stake moved between winners and losers (wagering matches in
    /// the points-eligible era only).
    #[serde(
        default = "default_stake",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub stake: i64,
}

fn default_stake() -> i64 {
    DEFAULT_STAKE
}

impl Match {
    pub fn new(
        kind: MatchKind,
        played_at: DateTime<Utc>,
        team_1: Vec<PlayerId>,
        team_2: Vec<PlayerId>,
        score_1: i32,
        score_2: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            played_at,
            team_1,
            team_2,
            score_1,
            score_2,
            winner_hint: None,
            stake: DEFAULT_STAKE,
        }
    }

    /// Equal scores make a match void: excluded from all statistics.
    pub fn is_void(&self) -> bool {
        self.score_1 == self.score_2
    }

    /// Winning side, derived from the scores. Falls back to the stored hint
    /// only when scores are equal; that path should be unreachable behind the
    /// void check, so hitting it is logged.
    pub fn winner(&self) -> Option<Team> {
        if self.score_1 > self.score_2 {
            Some(Team::One)
        } else if self.score_2 > self.score_1 {
            Some(Team::Two)
        } else {
            if self.winner_hint.is_some() {
                warn!(
                    "match {}: equal scores resolved via stored winner hint",
                    self.id
                );
            }
            self.winner_hint
        }
    }

    /// Player ids on the given side.
    pub fn team(&self, side: Team) -> &[PlayerId] {
        match side {
            Team::One => &self.team_1,
            Team::Two => &self.team_2,
        }
    }

    /// Score of the given side.
    pub fn score(&self, side: Team) -> i32 {
        match side {
            Team::One => self.score_1,
            Team::Two => self.score_2,
        }
    }

    /// All participant ids, side 1 then side 2.
    pub fn participants(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_1.iter().chain(self.team_2.iter())
    }

    /// Calendar month this match falls in.
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.played_at)
    }
}

/// A calendar month, used to bucket tournament matches for placement bonuses.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

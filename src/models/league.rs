//! League aggregate: the player roster plus the full match history.

use crate::models::game::{Match, MatchId, Team};
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors that can occur when mutating the league or generating teams.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player name is empty after trimming.
    EmptyPlayerName,
    /// Player not found in the roster.
    PlayerNotFound(PlayerId),
    /// Match not found in the history.
    MatchNotFound(MatchId),
    /// A side must field 1 (singles) or 2 (doubles) players.
    InvalidTeamSize { side: Team, size: usize },
    /// The same player appears on both sides of one match.
    PlayerOnBothTeams(PlayerId),
    /// Scores are rally counts and cannot be negative.
    NegativeScore,
    /// Not enough active players to generate teams.
    NotEnoughPlayers { required: usize, available: usize },
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            LeagueError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            LeagueError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            LeagueError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            LeagueError::InvalidTeamSize { side, size } => {
                write!(f, "Team {:?} has {} players (must be 1 or 2)", side, size)
            }
            LeagueError::PlayerOnBothTeams(id) => {
                write!(f, "Player {} appears on both sides", id)
            }
            LeagueError::NegativeScore => write!(f, "Scores cannot be negative"),
            LeagueError::NotEnoughPlayers {
                required,
                available,
            } => write!(
                f,
                "Need at least {} active players (have {})",
                required, available
            ),
        }
    }
}

/// Structural problem with a match record, if any. Shared by match entry and
/// the import boundary so both enforce the same shape rules.
pub(crate) fn match_shape_violation(m: &Match) -> Option<LeagueError> {
    for (side, team) in [(Team::One, &m.team_1), (Team::Two, &m.team_2)] {
        if team.is_empty() || team.len() > 2 {
            return Some(LeagueError::InvalidTeamSize {
                side,
                size: team.len(),
            });
        }
    }
    let side_1: HashSet<&PlayerId> = m.team_1.iter().collect();
    if let Some(shared) = m.team_2.iter().find(|id| side_1.contains(id)) {
        return Some(LeagueError::PlayerOnBothTeams(shared.clone()));
    }
    if m.score_1 < 0 || m.score_2 < 0 {
        return Some(LeagueError::NegativeScore);
    }
    None
}

/// The whole persisted state of a league: who plays, and every match ever
/// recorded. Derived player statistics are *not* stored here — they are
/// recomputed from the history on every read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct League {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl League {
    /// Create an empty league.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a player by id.
    pub fn get_player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable reference to a player by id.
    pub fn get_player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Players who should appear in team generation and the leaderboard.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active)
    }

    /// Add a player. Names are trimmed and must be unique (case-insensitive).
    /// Returns the new player's id.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, LeagueError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(LeagueError::EmptyPlayerName);
        }
        if self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(trimmed))
        {
            return Err(LeagueError::DuplicatePlayerName);
        }
        let player = Player::new(trimmed);
        let id = player.id.clone();
        self.players.push(player);
        Ok(id)
    }

    /// Mark a player active or inactive. Inactive players keep their history.
    pub fn set_player_active(&mut self, id: &str, active: bool) -> Result<(), LeagueError> {
        let player = self
            .get_player_mut(id)
            .ok_or_else(|| LeagueError::PlayerNotFound(id.to_string()))?;
        player.is_active = active;
        Ok(())
    }

    /// Record a completed match. Validates team shape, disjoint sides,
    /// non-negative scores, and that every participant is on the roster.
    pub fn record_match(&mut self, m: Match) -> Result<(), LeagueError> {
        if let Some(err) = match_shape_violation(&m) {
            return Err(err);
        }
        for id in m.participants() {
            if self.get_player(id).is_none() {
                return Err(LeagueError::PlayerNotFound(id.clone()));
            }
        }
        self.matches.push(m);
        Ok(())
    }

    /// Remove a match from the history (stats self-correct on the next replay).
    pub fn remove_match(&mut self, id: &str) -> Result<(), LeagueError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| LeagueError::MatchNotFound(id.to_string()))?;
        self.matches.remove(idx);
        Ok(())
    }
}

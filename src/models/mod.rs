//! Data structures for the league: players, matches, standings, league state.

mod game;
mod league;
mod player;
mod standings;

pub use game::{Match, MatchId, MatchKind, MonthKey, Team, DEFAULT_STAKE};
pub use league::{League, LeagueError};
pub use player::{Player, PlayerId, DEFAULT_INITIAL_POINTS, DEFAULT_RATING};
pub use standings::StandingsRow;

pub(crate) use league::match_shape_violation;

//! Pickleball league tracker: library with models and business logic.

pub mod import;
pub mod logic;
pub mod models;

pub use import::{league_from_json, matches_from_csv, ImportError};
pub use logic::{
    apply_ladder_update, apply_logistic_update, apply_monthly_bonuses, balanced_doubles_teams,
    calculate_player_stats, compute_standings, daily_rating_history, match_rating_details,
    round_robin_pairings, select_rating_rule, DailyRatingSnapshot, DoublesTeam, LogisticBreakdown,
    MatchRatingDetails, MemberChange, RatingEra, RatingMap, RuleSchedule, RuleSelection,
};
pub use models::{
    League, LeagueError, Match, MatchId, MatchKind, MonthKey, Player, PlayerId, StandingsRow, Team,
};

//! Storage-boundary normalization: whole-league JSON and match-sheet CSV.
//!
//! Defaulting is lenient (missing optional fields take documented defaults,
//! numbers stored as strings parse), validation is strict: a malformed score
//! or team is a typed error here, never a silently zeroed match. The core
//! assumes clean records beyond this boundary.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    match_shape_violation, League, LeagueError, Match, MatchId, MatchKind, PlayerId, DEFAULT_STAKE,
};

/// Errors from the import boundary.
#[derive(Debug)]
pub enum ImportError {
    Json(serde_json::Error),
    Csv(csv::Error),
    /// A match in an imported league payload fails shape validation.
    InvalidMatch(MatchId, LeagueError),
    /// A CSV data row (1-based, header excluded) fails parsing or validation.
    InvalidRow { row: usize, problem: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Json(e) => write!(f, "invalid league JSON: {}", e),
            ImportError::Csv(e) => write!(f, "invalid match CSV: {}", e),
            ImportError::InvalidMatch(id, e) => write!(f, "invalid match {}: {}", id, e),
            ImportError::InvalidRow { row, problem } => write!(f, "CSV row {}: {}", row, problem),
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::Json(e)
    }
}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        ImportError::Csv(e)
    }
}

fn invalid_row(row: usize, problem: String) -> ImportError {
    ImportError::InvalidRow { row, problem }
}

/// Parse a whole league from its JSON export and validate every match's
/// shape. Participant ids are not checked against the roster: legacy
/// histories reference departed players, and the replay skips unknowns.
pub fn league_from_json(payload: &str) -> Result<League, ImportError> {
    let league: League = serde_json::from_str(payload)?;
    for m in &league.matches {
        if let Some(problem) = match_shape_violation(m) {
            return Err(ImportError::InvalidMatch(m.id.clone(), problem));
        }
    }
    Ok(league)
}

/// One row of the match-sheet CSV, as raw text. Columns:
/// `id?, kind, played_at, team_1, team_2, score_1, score_2, stake?`
/// where teams join ids with `+` (e.g. `alice+bob`).
#[derive(Debug, Deserialize)]
struct CsvMatchRow {
    #[serde(default)]
    id: Option<String>,
    kind: String,
    played_at: String,
    team_1: String,
    team_2: String,
    score_1: String,
    score_2: String,
    #[serde(default)]
    stake: Option<String>,
}

/// Parse a match-sheet CSV into validated match records.
pub fn matches_from_csv(payload: &str) -> Result<Vec<Match>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(payload.as_bytes());

    let mut matches = Vec::new();
    for (index, record) in reader.deserialize::<CsvMatchRow>().enumerate() {
        let row = index + 1;
        matches.push(record?.into_match(row)?);
    }
    Ok(matches)
}

impl CsvMatchRow {
    fn into_match(self, row: usize) -> Result<Match, ImportError> {
        let kind = match self.kind.as_str() {
            "wagering" => MatchKind::Wagering,
            "tournament" => MatchKind::Tournament,
            other => return Err(invalid_row(row, format!("unknown match kind `{}`", other))),
        };
        let played_at = DateTime::parse_from_rfc3339(&self.played_at)
            .map_err(|_| invalid_row(row, format!("invalid timestamp `{}`", self.played_at)))?
            .with_timezone(&Utc);
        let score_1 = parse_score(row, "score_1", &self.score_1)?;
        let score_2 = parse_score(row, "score_2", &self.score_2)?;
        let stake = match self.stake.as_deref() {
            None | Some("") => DEFAULT_STAKE,
            Some(raw) => raw
                .parse()
                .map_err(|_| invalid_row(row, format!("invalid stake `{}`", raw)))?,
        };
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };

        let m = Match {
            id,
            kind,
            played_at,
            team_1: parse_team(&self.team_1),
            team_2: parse_team(&self.team_2),
            score_1,
            score_2,
            winner_hint: None,
            stake,
        };
        if let Some(problem) = match_shape_violation(&m) {
            return Err(invalid_row(row, problem.to_string()));
        }
        Ok(m)
    }
}

fn parse_score(row: usize, field: &str, raw: &str) -> Result<i32, ImportError> {
    raw.parse()
        .map_err(|_| invalid_row(row, format!("invalid {} `{}`", field, raw)))
}

fn parse_team(raw: &str) -> Vec<PlayerId> {
    raw.split('+')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

//! Era selection: which rating rule governs a match, decided by its date.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The rating rule in force when a match was played.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingEra {
    /// Before rated play began: no ledger movement, no rating movement.
    Unrated,
    /// Fixed-step ladder rule.
    Ladder,
    /// Logistic expected-outcome rule.
    Logistic,
}

/// Era plus ledger eligibility for one match timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RuleSelection {
    pub era: RatingEra,
    /// Whether wagering stakes move the points ledger at this time.
    pub points_eligible: bool,
}

/// The calendar boundaries the league's rule history is split by. These are
/// facts of the league's past, not configuration: every replay of the same
/// history must classify every match identically.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RuleSchedule {
    /// Wagering stakes start moving the ledger from here.
    pub points_start: DateTime<Utc>,
    /// The ladder rule applies from here...
    pub ladder_start: DateTime<Utc>,
    /// ...until the logistic rule takes over here.
    pub logistic_start: DateTime<Utc>,
}

impl RuleSchedule {
    /// The canonical schedule. Ledger points and ladder rating began together
    /// in October 2023; the logistic rule replaced the ladder the following
    /// June.
    pub fn canonical() -> Self {
        Self {
            points_start: Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap(),
            ladder_start: Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap(),
            logistic_start: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    /// Classify one timestamp. Each boundary is inclusive on its own era, and
    /// ledger eligibility is independent of which rating rule applies.
    pub fn select(&self, at: DateTime<Utc>) -> RuleSelection {
        let era = if at >= self.logistic_start {
            RatingEra::Logistic
        } else if at >= self.ladder_start {
            RatingEra::Ladder
        } else {
            RatingEra::Unrated
        };
        RuleSelection {
            era,
            points_eligible: at >= self.points_start,
        }
    }
}

/// Rule selection against the canonical schedule, the single classification
/// every rating code path goes through.
pub fn select_rating_rule(at: DateTime<Utc>) -> RuleSelection {
    RuleSchedule::canonical().select(at)
}

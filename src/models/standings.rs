//! Derived standings rows for doubles pairs or individuals.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Accumulated record for one id-set (a doubles pair or an individual) over a
/// filtered match set. Derived on demand, never persisted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// Sorted member ids — the row's identity. Both orderings of a doubles
    /// pair collapse to the same row.
    pub members: Vec<PlayerId>,
    pub wins: u32,
    pub losses: u32,
    pub points_scored: i64,
    pub points_conceded: i64,
}

impl StandingsRow {
    pub fn new(members: Vec<PlayerId>) -> Self {
        Self {
            members,
            wins: 0,
            losses: 0,
            points_scored: 0,
            points_conceded: 0,
        }
    }

    /// Points scored minus points conceded.
    pub fn point_diff(&self) -> i64 {
        self.points_scored - self.points_conceded
    }
}

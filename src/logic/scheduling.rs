//! Tournament-night scheduling: balanced doubles teams and round-robin rounds.

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::Serialize;

use crate::logic::round2;
use crate::models::{LeagueError, Player, PlayerId};

/// A generated doubles pairing with its combined strength.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DoublesTeam {
    pub players: Vec<PlayerId>,
    pub combined_rating: f64,
}

/// Pair players into rating-balanced doubles teams: strongest with weakest,
/// working inward. Players are shuffled before the rating sort so ties break
/// differently night to night, and with an odd headcount one random player
/// sits out (returned separately). Fewer than 4 players cannot form two
/// teams.
pub fn balanced_doubles_teams(
    players: &[Player],
) -> Result<(Vec<DoublesTeam>, Option<PlayerId>), LeagueError> {
    if players.len() < 4 {
        return Err(LeagueError::NotEnoughPlayers {
            required: 4,
            available: players.len(),
        });
    }

    let mut pool: Vec<&Player> = players.iter().collect();
    pool.shuffle(&mut thread_rng());
    let sits_out = if pool.len() % 2 == 1 {
        pool.pop().map(|player| player.id.clone())
    } else {
        None
    };
    pool.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let mut teams = Vec::with_capacity(pool.len() / 2);
    let (mut strong, mut weak) = (0, pool.len() - 1);
    while strong < weak {
        teams.push(DoublesTeam {
            players: vec![pool[strong].id.clone(), pool[weak].id.clone()],
            combined_rating: round2(pool[strong].rating + pool[weak].rating),
        });
        strong += 1;
        weak -= 1;
    }
    Ok((teams, sits_out))
}

/// Round-robin rounds over `n` teams as index pairs, via the circle method:
/// slot 0 stays fixed while the rest rotate one place per round. Odd `n`
/// gives each team one bye; every pair of teams meets exactly once.
pub fn round_robin_pairings(n: usize) -> Vec<Vec<(usize, usize)>> {
    if n < 2 {
        return Vec::new();
    }
    let mut slots: Vec<Option<usize>> = (0..n).map(Some).collect();
    if n % 2 == 1 {
        slots.push(None);
    }
    let rounds = slots.len() - 1;
    let half = slots.len() / 2;

    let mut schedule = Vec::with_capacity(rounds);
    for _ in 0..rounds {
        let mut round = Vec::with_capacity(half);
        for i in 0..half {
            if let (Some(a), Some(b)) = (slots[i], slots[slots.len() - 1 - i]) {
                round.push((a, b));
            }
        }
        schedule.push(round);
        slots[1..].rotate_right(1);
    }
    schedule
}

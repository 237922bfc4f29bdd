//! Integration tests for the monthly placement bonus engine.

use std::collections::HashMap;

use pickleball_league_web::{
    apply_monthly_bonuses, Match, MatchKind, MonthKey, Player, PlayerId, RatingMap,
};

fn player(id: &str) -> Player {
    let mut p = Player::new(id);
    p.id = id.to_string();
    p
}

fn player_map(ids: &[&str]) -> HashMap<PlayerId, Player> {
    ids.iter().map(|id| (id.to_string(), player(id))).collect()
}

fn default_ratings(ids: &[&str]) -> RatingMap {
    ids.iter().map(|id| (id.to_string(), 3.0)).collect()
}

fn played(id: &str, at: &str, team_1: &[&str], team_2: &[&str], score_1: i32, score_2: i32) -> Match {
    let mut m = Match::new(
        MatchKind::Tournament,
        at.parse().unwrap(),
        team_1.iter().map(|s| s.to_string()).collect(),
        team_2.iter().map(|s| s.to_string()).collect(),
        score_1,
        score_2,
    );
    m.id = id.to_string();
    m
}

#[test]
fn months_with_fewer_than_three_rows_award_nothing() {
    let ids = ["x", "y"];
    let mut players = player_map(&ids);
    let mut ratings = default_ratings(&ids);
    let matches = vec![played("m1", "2024-07-02T18:00:00Z", &["x"], &["y"], 11, 6)];
    let refs: Vec<&Match> = matches.iter().collect();

    apply_monthly_bonuses(MonthKey { year: 2024, month: 7 }, &refs, &mut players, &mut ratings);

    assert_eq!(ratings["x"], 3.0);
    assert_eq!(ratings["y"], 3.0);
    assert_eq!(players["x"].championships, 0);
}

#[test]
fn three_row_month_scales_bonuses_down() {
    let ids = ["x", "y", "z"];
    let mut players = player_map(&ids);
    let mut ratings = default_ratings(&ids);
    // x 2W, y 1W, z 0W: three ranked rows, scale 1 + 0.10 * (3 - 5) = 0.8.
    let matches = vec![
        played("m1", "2024-07-02T18:00:00Z", &["x"], &["y"], 11, 3),
        played("m2", "2024-07-02T19:00:00Z", &["x"], &["z"], 11, 4),
        played("m3", "2024-07-09T18:00:00Z", &["y"], &["z"], 11, 5),
    ];
    let refs: Vec<&Match> = matches.iter().collect();

    apply_monthly_bonuses(MonthKey { year: 2024, month: 7 }, &refs, &mut players, &mut ratings);

    assert_eq!(ratings["x"], 3.08);
    assert_eq!(ratings["y"], 3.06);
    assert_eq!(ratings["z"], 3.04);
    assert_eq!(players["x"].championships, 1);
    assert_eq!(players["y"].championships, 0);
    assert_eq!(players["z"].championships, 0);
}

#[test]
fn large_fields_hit_the_bonus_cap() {
    // p0 beats p1..p10: eleven ranked rows, scale 1.6, raw 1st bonus 0.16.
    let ids: Vec<String> = (0..11).map(|i| format!("p{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut players = player_map(&id_refs);
    let mut ratings = default_ratings(&id_refs);

    let matches: Vec<Match> = (1..11)
        .map(|i| {
            played(
                &format!("m{i}"),
                "2024-07-02T18:00:00Z",
                &["p0"],
                &[&format!("p{i}")],
                11,
                i as i32 % 5,
            )
        })
        .collect();
    let refs: Vec<&Match> = matches.iter().collect();

    apply_monthly_bonuses(MonthKey { year: 2024, month: 7 }, &refs, &mut players, &mut ratings);

    assert_eq!(ratings["p0"], 3.15);
    assert_eq!(players["p0"].championships, 1);
}

#[test]
fn unrated_months_award_championships_but_no_rating() {
    let ids = ["x", "y", "z"];
    let mut players = player_map(&ids);
    let mut ratings = default_ratings(&ids);
    // September 2023 predates rated play entirely.
    let matches = vec![
        played("m1", "2023-09-05T18:00:00Z", &["x"], &["y"], 11, 3),
        played("m2", "2023-09-05T19:00:00Z", &["x"], &["z"], 11, 4),
        played("m3", "2023-09-12T18:00:00Z", &["y"], &["z"], 11, 5),
    ];
    let refs: Vec<&Match> = matches.iter().collect();

    apply_monthly_bonuses(MonthKey { year: 2023, month: 9 }, &refs, &mut players, &mut ratings);

    assert_eq!(ratings["x"], 3.0);
    assert_eq!(ratings["y"], 3.0);
    assert_eq!(players["x"].championships, 1);
}

#[test]
fn every_member_of_the_winning_pair_gets_the_award() {
    let ids = ["a", "b", "c", "d", "e", "f"];
    let mut players = player_map(&ids);
    let mut ratings = default_ratings(&ids);
    let matches = vec![
        played("m1", "2024-07-02T18:00:00Z", &["a", "b"], &["c", "d"], 11, 5),
        played("m2", "2024-07-02T19:00:00Z", &["a", "b"], &["e", "f"], 11, 6),
        played("m3", "2024-07-09T18:00:00Z", &["c", "d"], &["e", "f"], 11, 7),
    ];
    let refs: Vec<&Match> = matches.iter().collect();

    apply_monthly_bonuses(MonthKey { year: 2024, month: 7 }, &refs, &mut players, &mut ratings);

    assert_eq!(ratings["a"], 3.08);
    assert_eq!(ratings["b"], 3.08);
    assert_eq!(players["a"].championships, 1);
    assert_eq!(players["b"].championships, 1);
    assert_eq!(ratings["c"], 3.06);
    assert_eq!(ratings["e"], 3.04);
}

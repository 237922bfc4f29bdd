//! Single binary web server: JSON REST API over one in-memory league.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use pickleball_league_web::{
    balanced_doubles_teams, calculate_player_stats, compute_standings, daily_rating_history,
    league_from_json, match_rating_details, matches_from_csv, round_robin_pairings, DoublesTeam,
    League, Match, MatchId, MatchKind, Player, PlayerId,
};
use serde::Deserialize;
use std::sync::RwLock;

/// In-memory state: the single league, guarded for concurrent handlers.
/// Reads take the lock briefly and replay history on their own copy.
type AppState = Data<RwLock<League>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct SetActiveBody {
    is_active: bool,
}

#[derive(Deserialize)]
struct RecordMatchBody {
    kind: MatchKind,
    played_at: DateTime<Utc>,
    team_1: Vec<PlayerId>,
    team_2: Vec<PlayerId>,
    score_1: i32,
    score_2: i32,
    stake: Option<i64>,
}

/// Query string: standings filter (e.g. /api/standings?kind=tournament&year=2024&month=6)
#[derive(Deserialize)]
struct StandingsQuery {
    kind: MatchKind,
    year: Option<i32>,
    month: Option<u32>,
}

/// Path segment: player id (e.g. /api/players/{id}/active)
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Path segment: match id (e.g. /api/matches/{id}/rating-details)
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[derive(serde::Serialize)]
struct LeaderboardEntry {
    id: PlayerId,
    name: String,
    rating: f64,
    wagering_balance: i64,
    matches_played: u32,
    wins: u32,
    losses: u32,
    championships: u32,
}

#[derive(serde::Serialize)]
struct SchedulePreview {
    teams: Vec<DoublesTeam>,
    sits_out: Option<PlayerId>,
    /// Round-robin rounds as pairs of indexes into `teams`.
    rounds: Vec<Vec<(usize, usize)>>,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-league-web",
    })
}

/// All players with their statistics recomputed from the match history.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(calculate_player_stats(&g.players, &g.matches))
}

/// Add a player to the roster.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.add_player(body.name.trim()) {
        Ok(id) => match g.get_player(&id) {
            Some(player) => HttpResponse::Ok().json(player),
            None => HttpResponse::InternalServerError().body("player vanished"),
        },
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Activate or retire a player. Retired players keep their match history.
#[put("/api/players/{id}/active")]
async fn api_set_player_active(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<SetActiveBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.set_player_active(&path.id, body.is_active) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Full match history in replay order.
#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut matches: Vec<Match> = g.matches.clone();
    matches.sort_by(|a, b| a.played_at.cmp(&b.played_at).then_with(|| a.id.cmp(&b.id)));
    HttpResponse::Ok().json(matches)
}

/// Record a completed match. Every participant must be on the roster.
#[post("/api/matches")]
async fn api_record_match(state: AppState, body: Json<RecordMatchBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut m = Match::new(
        body.kind,
        body.played_at,
        body.team_1,
        body.team_2,
        body.score_1,
        body.score_2,
    );
    if let Some(stake) = body.stake {
        m.stake = stake;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let recorded = m.clone();
    match g.record_match(m) {
        Ok(()) => HttpResponse::Ok().json(recorded),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a match; all statistics self-correct on the next read.
#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_match(&path.id) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Active players ranked by rating, wagering balance as tie-break.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut entries: Vec<LeaderboardEntry> = calculate_player_stats(&g.players, &g.matches)
        .into_iter()
        .filter(|p| p.is_active)
        .map(|p| LeaderboardEntry {
            wagering_balance: p.wagering_balance(),
            id: p.id,
            name: p.name,
            rating: p.rating,
            matches_played: p.matches_played,
            wins: p.wins,
            losses: p.losses,
            championships: p.championships,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.wagering_balance.cmp(&a.wagering_balance))
            .then_with(|| a.name.cmp(&b.name))
    });
    HttpResponse::Ok().json(entries)
}

/// Pair (or singles) standings over matches of one kind, optionally narrowed
/// to a year or a single month.
#[get("/api/standings")]
async fn api_standings(state: AppState, query: Query<StandingsQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let filtered: Vec<&Match> = g
        .matches
        .iter()
        .filter(|m| m.kind == query.kind)
        .filter(|m| query.year.map_or(true, |year| m.month().year == year))
        .filter(|m| query.month.map_or(true, |month| m.month().month == month))
        .collect();
    HttpResponse::Ok().json(compute_standings(&filtered))
}

/// Rating of every player after each day of play.
#[get("/api/ratings/daily")]
async fn api_daily_ratings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(daily_rating_history(&g.players, &g.matches))
}

/// Why one match moved ratings: era, pre-match ratings, logistic breakdown.
#[get("/api/matches/{id}/rating-details")]
async fn api_match_rating_details(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match match_rating_details(&path.id, &g.players, &g.matches) {
        Some(details) => HttpResponse::Ok().json(details),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" })),
    }
}

/// Balanced doubles teams from current ratings plus a round-robin schedule.
/// Regenerating gives a different split among equal ratings.
#[get("/api/schedule/preview")]
async fn api_schedule_preview(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let active: Vec<Player> = calculate_player_stats(&g.players, &g.matches)
        .into_iter()
        .filter(|p| p.is_active)
        .collect();
    match balanced_doubles_teams(&active) {
        Ok((teams, sits_out)) => {
            let rounds = round_robin_pairings(teams.len());
            HttpResponse::Ok().json(SchedulePreview {
                teams,
                sits_out,
                rounds,
            })
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// The whole league as JSON (players and match history, no derived stats).
#[get("/api/league/export")]
async fn api_export_league(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&*g)
}

/// Replace the league from a JSON export.
#[post("/api/league/import")]
async fn api_import_league(state: AppState, body: String) -> HttpResponse {
    let league = match league_from_json(&body) {
        Ok(league) => league,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    *g = league;
    HttpResponse::Ok().json(&*g)
}

/// Append matches from a CSV sheet. Rows may reference players who have left
/// the roster; the replay skips them.
#[post("/api/matches/import-csv")]
async fn api_import_matches_csv(state: AppState, body: String) -> HttpResponse {
    let imported = match matches_from_csv(&body) {
        Ok(matches) => matches,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.matches.extend(imported);
    HttpResponse::Ok().json(&*g)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(League::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_set_player_active)
            .service(api_list_matches)
            .service(api_record_match)
            .service(api_delete_match)
            .service(api_leaderboard)
            .service(api_standings)
            .service(api_daily_ratings)
            .service(api_match_rating_details)
            .service(api_schedule_preview)
            .service(api_export_league)
            .service(api_import_league)
            .service(api_import_matches_csv)
    })
    .bind(bind)?
    .run()
    .await
}

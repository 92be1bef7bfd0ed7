use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::json;

use statsnap::StatAggregator;
use statsnap::feed_fetch::parse_feed_json;
use statsnap::game_log::{Stat, Venue};
use statsnap::normalize::RowIssue;
use statsnap::smart_bets::{ConfidenceTier, MAX_BEST_BETS};
use statsnap::team_insights::{
    MAX_LEADERS, Outcome, RECENT_RESULTS, normalize_team_feed, recent_results, stat_leaders,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_engine() -> StatAggregator {
    let feed = parse_feed_json(&read_fixture("player_feed.json")).unwrap();
    StatAggregator::from_feed(&feed).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn points_leaders_split_home_and_road() {
    let engine = fixture_engine();
    let leaders = engine.stat_leaders("Celtics", Stat::Points);

    assert_eq!(leaders.len(), 2);
    assert_eq!(leaders[0].player, "Jayson Tatum");
    assert_eq!((leaders[0].home_avg, leaders[0].road_avg), (25.0, 30.0));
    assert_eq!((leaders[0].home_games, leaders[0].road_games), (2, 2));
    assert_eq!(leaders[1].player, "Jaylen Brown");
    assert_eq!((leaders[1].home_avg, leaders[1].road_avg), (22.0, 18.0));
}

#[test]
fn leaders_are_capped() {
    let rows: Vec<_> = (0..9)
        .map(|i| {
            statsnap::normalize::normalize_row(&json!({
                "date": "2024-01-01",
                "playerName": format!("Player {i}"),
                "ownTeam": "Heat",
                "opponentTeam": "Nets",
                "venue": "H",
                "points": i * 2,
            }))
            .unwrap()
        })
        .collect();
    let leaders = stat_leaders(&rows, "heat", Stat::Points);
    assert_eq!(leaders.len(), MAX_LEADERS);
    assert_eq!(leaders[0].player, "Player 8");
    assert_eq!(leaders[0].road_games, 0);
    assert!(stat_leaders(&rows, "Nets", Stat::Points).is_empty());
}

#[test]
fn team_feed_normalizes_with_rejections() {
    let feed = parse_feed_json(&read_fixture("team_feed.json")).unwrap();
    let normalized = normalize_team_feed(&feed).unwrap();

    assert_eq!(normalized.rows.len(), 5);
    assert_eq!(normalized.rejected.len(), 1);
    assert_eq!(normalized.rejected[0].index, 4);
    assert_eq!(normalized.rejected[0].issue, RowIssue::UnparseableDate);
    assert_eq!(normalized.rows[1].date, ymd(2024, 1, 11));
    assert_eq!((normalized.rows[1].home_points, normalized.rows[1].away_points), (105, 99));
}

#[test]
fn recent_results_for_celtics() {
    let feed = parse_feed_json(&read_fixture("team_feed.json")).unwrap();
    let games = normalize_team_feed(&feed).unwrap().rows;
    let results = recent_results(&games, "celtics");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].date, ymd(2024, 1, 5));
    assert_eq!(results[0].venue, Venue::Home);
    assert_eq!(results[0].outcome, Outcome::Win);
    assert_eq!((results[0].team_points, results[0].opponent_points), (120, 110));

    assert_eq!(results[1].opponent, "Heat");
    assert_eq!(results[1].venue, Venue::Road);
    assert_eq!(results[1].outcome, Outcome::Loss);

    // The corrected g3 row replaces the first one.
    assert_eq!(results[2].opponent, "Lakers");
    assert_eq!((results[2].team_points, results[2].opponent_points), (118, 112));
    assert_eq!(results[2].outcome, Outcome::Win);
}

#[test]
fn recent_results_keep_last_ten() {
    let rows: Vec<_> = (1..=14)
        .map(|day| {
            json!({
                "GAME_ID": format!("g{day}"),
                "GAME_DATE": format!("2024-02-{day:02}"),
                "HOME_TEAM": "Suns",
                "AWAY_TEAM": "Jazz",
                "PTS_FOR": 100,
                "PTS_AGAINST": 100,
            })
        })
        .collect();
    let games = normalize_team_feed(&json!(rows)).unwrap().rows;
    let results = recent_results(&games, "Jazz");

    assert_eq!(results.len(), RECENT_RESULTS);
    assert_eq!(results[0].date, ymd(2024, 2, 5));
    assert_eq!(results[9].date, ymd(2024, 2, 14));
    assert!(results.iter().all(|r| r.outcome == Outcome::Tie));
    assert!(recent_results(&games, "").is_empty());
}

#[test]
fn best_bets_for_fixture_matchup() {
    let engine = fixture_engine();
    let bets = engine.best_bets("Celtics", "Lakers");

    // Only Tatum has three games; Brown and James fall short.
    assert_eq!(bets.len(), 4);
    assert!(bets.len() <= MAX_BEST_BETS);
    assert!(bets.iter().all(|b| b.player == "Jayson Tatum" && b.is_home));
    assert!(bets.windows(2).all(|w| w[0].confidence >= w[1].confidence));

    let points = bets.iter().find(|b| b.stat == Stat::Points).unwrap();
    assert_eq!(points.line, 30.0);
    assert_eq!(points.hit_rate, 0.25);
    assert!((points.confidence - 77.25).abs() < 1e-9);
    assert_eq!(points.tier, ConfidenceTier::Low);
}

#[test]
fn best_bets_need_known_teams() {
    let engine = fixture_engine();
    assert!(engine.best_bets("Warriors", "Suns").is_empty());
    assert!(engine.best_bets("", "").is_empty());
}

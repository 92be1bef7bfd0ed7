use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::json;

use statsnap::dedup::{DedupKey, DedupScope, deduplicate, deduplicate_with};
use statsnap::game_log::GameLogRow;
use statsnap::normalize::{normalize_feed, normalize_row};

fn game(date: (i32, u32, u32), player: &str, own: &str, opp: &str, pts: u32) -> GameLogRow {
    let mut row = normalize_row(&json!({
        "date": NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap().to_string(),
        "playerName": player,
        "ownTeam": own,
        "opponentTeam": opp,
    }))
    .unwrap();
    row.points = pts;
    row
}

#[test]
fn same_game_in_two_date_formats_collapses() {
    let feed = json!([
        { "DATE": "2024-01-05", "OWN TEAM": "BOS", "OPPONENT TEAM": "LAL", "PTS": 22 },
        { "DATE": "01/05/2024", "OWN TEAM": "BOS", "OPPONENT TEAM": "LAL", "PTS": 22 }
    ]);
    let rows = normalize_feed(&feed).unwrap().rows;
    let outcome = deduplicate(rows);

    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.total_input, 2);
    assert_eq!(outcome.retained, 1);
    assert_eq!(outcome.duplicates, 1);
}

#[test]
fn first_seen_wins_and_order_is_preserved() {
    let rows = vec![
        game((2024, 1, 3), "A", "BOS", "NYK", 10),
        game((2024, 1, 1), "A", "BOS", "LAL", 11),
        game((2024, 1, 3), "A", "bos", "nyk ", 99),
        game((2024, 1, 2), "A", "BOS", "MIA", 12),
        game((2024, 1, 1), "A", "BOS", "LAL", 98),
    ];
    let outcome = deduplicate(rows);

    let points: Vec<u32> = outcome.rows.iter().map(|r| r.points).collect();
    assert_eq!(points, vec![10, 11, 12]);
    assert_eq!(outcome.duplicates, 2);
}

#[test]
fn no_two_retained_rows_share_a_key() {
    let mut rows = Vec::new();
    for day in 1..=6u32 {
        for team in ["BOS", "LAL", "MIA"] {
            rows.push(game((2024, 2, day % 3 + 1), "P", team, "NYK", day));
        }
    }
    let outcome = deduplicate(rows);
    let mut keys = HashSet::new();
    for row in &outcome.rows {
        assert!(keys.insert(DedupKey::for_row(row, DedupScope::Game)));
    }
    assert_eq!(outcome.retained, 9);
}

#[test]
fn rows_without_opponent_are_dropped() {
    let rows = vec![
        game((2024, 1, 1), "A", "BOS", "", 10),
        game((2024, 1, 1), "A", "", "LAL", 10),
        game((2024, 1, 2), "A", "BOS", "LAL", 10),
    ];
    let outcome = deduplicate(rows);
    assert_eq!(outcome.retained, 1);
    assert_eq!(outcome.missing_fields, 2);
    assert_eq!(outcome.total_input, 3);
}

#[test]
fn per_player_scope_keeps_teammates() {
    let rows = vec![
        game((2024, 1, 1), "Tatum", "BOS", "LAL", 30),
        game((2024, 1, 1), "Brown", "BOS", "LAL", 22),
        game((2024, 1, 1), "tatum", "BOS", "LAL", 31),
    ];
    let game_scope = deduplicate_with(rows.clone(), DedupScope::Game);
    assert_eq!(game_scope.retained, 1);

    let player_scope = deduplicate_with(rows, DedupScope::PerPlayer);
    let points: Vec<u32> = player_scope.rows.iter().map(|r| r.points).collect();
    assert_eq!(points, vec![30, 22]);
}

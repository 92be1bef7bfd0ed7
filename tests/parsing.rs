use std::fs;
use std::path::PathBuf;

use statsnap::StatAggregator;
use statsnap::StatError;
use statsnap::feed_fetch::parse_feed_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn unwraps_known_envelopes() {
    let data = parse_feed_json(r#"{"data":[{"a":1},{"a":2}]}"#).unwrap();
    assert_eq!(data.as_array().map(Vec::len), Some(2));

    let response = parse_feed_json(r#"{"response":[{"a":1}]}"#).unwrap();
    assert_eq!(response.as_array().map(Vec::len), Some(1));

    let bare = parse_feed_json("[1, 2, 3]").unwrap();
    assert_eq!(bare.as_array().map(Vec::len), Some(3));
}

#[test]
fn empty_bodies_are_empty_feeds() {
    for raw in ["", "   ", "null"] {
        let value = parse_feed_json(raw).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(0), "input {raw:?}");
    }
}

#[test]
fn rejects_non_collections() {
    assert!(matches!(
        parse_feed_json("42"),
        Err(StatError::NotACollection(_))
    ));
    assert!(matches!(
        parse_feed_json(r#"{"data":"nope"}"#),
        Err(StatError::NotACollection(_))
    ));
    assert!(matches!(
        parse_feed_json("{not json"),
        Err(StatError::InvalidJson(_))
    ));
}

#[test]
fn engine_builds_from_fixture() {
    let feed = parse_feed_json(&read_fixture("player_feed.json")).unwrap();
    let engine = StatAggregator::from_feed(&feed).unwrap();

    assert_eq!(engine.teams(), vec!["Celtics".to_string(), "Lakers".to_string()]);
    assert_eq!(engine.resolve_team("Boston Celtics"), "Celtics");
    assert_eq!(engine.resolve_team("los angeles lakers"), "Lakers");
    assert_eq!(engine.resolve_team("Miami Heat"), "Heat");
    assert_eq!(engine.resolve_team("Sonics"), "Sonics");

    let rosters = engine.rosters();
    assert_eq!(
        rosters.get("Celtics"),
        Some(&vec!["Jaylen Brown".to_string(), "Jayson Tatum".to_string()])
    );
}

#[test]
fn engine_rejects_non_array_root() {
    let err = StatAggregator::from_feed(&serde_json::json!({"rows": []})).unwrap_err();
    assert!(matches!(err, StatError::NotACollection(_)));
}

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StatError, json_kind};
use crate::game_log::{GameLogRow, Stat, Venue};

pub const DATE_KEYS: &[&str] = &["date", "DATE", "GAME DATE", "GAME_DATE", "Date"];
pub const PLAYER_KEYS: &[&str] = &[
    "playerName",
    "PLAYER FULL NAME",
    "PLAYER",
    "PLAYER_NAME",
    "Player",
    "name",
];
pub const OWN_TEAM_KEYS: &[&str] = &["ownTeam", "OWN TEAM", "TEAM", "TEAM_ABBREVIATION", "Team"];
pub const OPPONENT_KEYS: &[&str] = &["opponentTeam", "OPPONENT TEAM", "OPPONENT", "OPP", "Opponent"];
const PLAYER_ID_KEYS: &[&str] = &["playerId", "PLAYER-ID", "PLAYER_ID"];
const VENUE_KEYS: &[&str] = &["venue", "VENUE (R/H/N)", "VENUE"];

// REB wins over TOT when a feed carries both; TOT is total rebounds in every
// feed we have seen.
fn stat_keys(stat: Stat) -> &'static [&'static str] {
    match stat {
        Stat::Points => &["points", "PTS", "POINTS", "Points"],
        Stat::Rebounds => &["rebounds", "REB", "TOT", "TRB", "REBOUNDS", "Rebounds"],
        Stat::Assists => &["assists", "AST", "A", "ASSISTS", "Assists"],
        Stat::ThreeMade => &["threeMade", "3PM", "3P", "THREEPM", "3PTM", "3 Pointers"],
        Stat::Steals => &["steals", "STL", "ST", "STEALS", "Steals"],
        Stat::Blocks => &["blocks", "BLK", "BL", "BLOCKS", "Blocks"],
    }
}

// Spreadsheet serial dates count days from 1899-12-30 (the Lotus leap-year bug
// is baked into that base).
const SERIAL_MIN: f64 = 10_000.0;
const SERIAL_MAX: f64 = 80_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowIssue {
    NotAnObject,
    UnparseableDate,
    MissingRequiredField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub issue: RowIssue,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedFeed {
    pub rows: Vec<GameLogRow>,
    pub rejected: Vec<Rejection>,
}

/// Normalize a decoded feed. Only a non-array root is an error.
pub fn normalize_feed(root: &Value) -> Result<NormalizedFeed> {
    let Some(records) = root.as_array() else {
        return Err(StatError::NotACollection(json_kind(root)));
    };
    Ok(normalize_records(records))
}

pub fn normalize_records(records: &[Value]) -> NormalizedFeed {
    let mut out = NormalizedFeed {
        rows: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
    };
    for (index, record) in records.iter().enumerate() {
        match normalize_row(record) {
            Ok(row) => out.rows.push(row),
            Err(issue) => out.rejected.push(Rejection { index, issue }),
        }
    }
    debug!(
        input = records.len(),
        normalized = out.rows.len(),
        rejected = out.rejected.len(),
        "normalized game log rows"
    );
    out
}

pub fn normalize_row(record: &Value) -> std::result::Result<GameLogRow, RowIssue> {
    if !record.is_object() {
        return Err(RowIssue::NotAnObject);
    }
    let date = pick_value(record, DATE_KEYS)
        .and_then(parse_game_date)
        .ok_or(RowIssue::UnparseableDate)?;

    let mut row = GameLogRow {
        date,
        player_name: pick_text(record, PLAYER_KEYS).unwrap_or_default(),
        own_team: pick_text(record, OWN_TEAM_KEYS).unwrap_or_default(),
        opponent_team: pick_text(record, OPPONENT_KEYS).unwrap_or_default(),
        points: 0,
        rebounds: 0,
        assists: 0,
        three_made: 0,
        steals: 0,
        blocks: 0,
        player_id: pick_text(record, PLAYER_ID_KEYS),
        venue: pick_text(record, VENUE_KEYS).and_then(|v| Venue::from_code(&v)),
    };
    for stat in Stat::ALL {
        row.set_stat(stat, pick_count(record, stat_keys(stat)));
    }
    Ok(row)
}

/// First alias whose value is present, non-null and not a blank string.
pub fn pick_value<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| match record.get(*key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    })
}

pub fn pick_text(record: &Value, keys: &[&str]) -> Option<String> {
    match pick_value(record, keys)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Counting stat from the first present alias. A present value that is not a
/// usable non-negative number counts as 0; later aliases are not consulted.
pub fn pick_count(record: &Value, keys: &[&str]) -> u32 {
    pick_value(record, keys)
        .and_then(value_as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}

pub fn parse_game_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => n.as_f64().and_then(serial_to_date),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

/// Accepts spreadsheet serials, ISO 8601 dates/date-times (extended or basic
/// `YYYYMMDD`), `MM/DD/YYYY` and `MM-DD-YYYY`. Date-times are shifted to UTC
/// before the time is dropped.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(date) = s.parse::<f64>().ok().and_then(serial_to_date) {
        return Some(date);
    }
    parse_iso(s)
        .or_else(|| parse_basic_iso(s))
        .or_else(|| parse_us_date(s))
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(serial > SERIAL_MIN && serial < SERIAL_MAX) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_days(Days::new(serial.floor() as u64))
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // `%#z` takes `Z`, `+00:00`, `+0000` and `-05`.
    let zoned = [
        "%Y-%m-%dT%H:%M:%S%.f%#z",
        "%Y-%m-%dT%H:%M%#z",
        "%Y-%m-%d %H:%M:%S%.f%#z",
        "%Y-%m-%d %H:%M%#z",
    ]
    .iter()
    .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok());
    if let Some(dt) = zoned {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .map(|dt| dt.date())
}

fn parse_basic_iso(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

fn parse_us_date(s: &str) -> Option<NaiveDate> {
    let sep = if s.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = s.split(sep).collect();
    let [mm, dd, yyyy] = parts.as_slice() else {
        return None;
    };
    if !(1..=2).contains(&mm.len()) || !(1..=2).contains(&dd.len()) || yyyy.len() != 4 {
        return None;
    }
    let month = mm.parse::<u32>().ok()?;
    let day = dd.parse::<u32>().ok()?;
    let year = yyyy.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_strategies_agree() {
        let expected = ymd(2024, 1, 5);
        assert_eq!(parse_date_str("2024-01-05"), Some(expected));
        assert_eq!(parse_date_str("01/05/2024"), Some(expected));
        assert_eq!(parse_date_str("1-5-2024"), Some(expected));
        assert_eq!(parse_date_str("2024-01-05T19:30:00Z"), Some(expected));
        assert_eq!(parse_date_str("2024-01-05T19:30:00"), Some(expected));
        assert_eq!(parse_game_date(&json!(45296)), Some(expected));
        assert_eq!(parse_date_str("45296"), Some(expected));
    }

    #[test]
    fn offsets_are_shifted_to_utc() {
        assert_eq!(
            parse_date_str("2024-01-05T22:00:00-05:00"),
            Some(ymd(2024, 1, 6))
        );
    }

    #[test]
    fn loose_iso_forms() {
        let expected = ymd(2024, 1, 5);
        assert_eq!(parse_date_str("2024-01-05T19:30Z"), Some(expected));
        assert_eq!(parse_date_str("2024-01-05T19:30:00+0000"), Some(expected));
        assert_eq!(parse_date_str("2024-01-05T19:30+01:00"), Some(expected));
        assert_eq!(parse_date_str("2024-01-05 19:30"), Some(expected));
        assert_eq!(parse_date_str("20240105"), Some(expected));
        assert_eq!(parse_date_str("2024-01-05T19:30:00-05"), Some(ymd(2024, 1, 6)));
        assert_eq!(parse_date_str("20241345"), None);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date_str(""), None);
        assert_eq!(parse_date_str("yesterday"), None);
        assert_eq!(parse_date_str("13/45/2024"), None);
        assert_eq!(parse_date_str("2024"), None);
        assert_eq!(parse_game_date(&json!(true)), None);
        assert_eq!(parse_game_date(&json!(5)), None);
    }

    #[test]
    fn pick_skips_null_and_blank() {
        let record = json!({ "PTS": null, "POINTS": "  ", "Points": "17" });
        assert_eq!(pick_count(&record, stat_keys(Stat::Points)), 17);
    }

    #[test]
    fn first_present_alias_wins_even_if_non_numeric() {
        let record = json!({ "REB": "n/a", "TOT": 9 });
        assert_eq!(pick_count(&record, stat_keys(Stat::Rebounds)), 0);
    }

    #[test]
    fn negative_counts_floor_to_zero() {
        let record = json!({ "AST": -3 });
        assert_eq!(pick_count(&record, stat_keys(Stat::Assists)), 0);
    }
}

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StatError, json_kind};
use crate::game_log::{GameLogRow, Stat, Venue};
use crate::normalize::{DATE_KEYS, Rejection, RowIssue, parse_game_date, pick_count, pick_text, pick_value};
use crate::select::{eq_fold, team_rows};

pub const MAX_LEADERS: usize = 6;
pub const RECENT_RESULTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderRow {
    pub player: String,
    pub home_avg: f64,
    pub road_avg: f64,
    pub home_games: usize,
    pub road_games: usize,
}

impl LeaderRow {
    fn combined(&self) -> f64 {
        self.home_avg + self.road_avg
    }
}

/// Home/road averages of `stat` for each player on `team`, best six by the
/// sum of both. Neutral-site and venue-less games count toward neither side.
pub fn stat_leaders(rows: &[GameLogRow], team: &str, stat: Stat) -> Vec<LeaderRow> {
    #[derive(Default)]
    struct Split {
        home: Vec<u32>,
        road: Vec<u32>,
    }

    let mut order: Vec<String> = Vec::new();
    let mut splits: HashMap<String, Split> = HashMap::new();
    for row in team_rows(rows, team) {
        let split = splits.entry(row.player_name.clone()).or_insert_with(|| {
            order.push(row.player_name.clone());
            Split::default()
        });
        match row.venue {
            Some(Venue::Home) => split.home.push(row.stat(stat)),
            Some(Venue::Road) => split.road.push(row.stat(stat)),
            _ => {}
        }
    }

    let mut leaders: Vec<LeaderRow> = order
        .into_iter()
        .filter_map(|player| {
            let split = splits.remove(&player)?;
            Some(LeaderRow {
                home_avg: avg(&split.home),
                road_avg: avg(&split.road),
                home_games: split.home.len(),
                road_games: split.road.len(),
                player,
            })
        })
        .collect();
    leaders.sort_by(|a, b| {
        b.combined()
            .total_cmp(&a.combined())
            .then_with(|| a.player.to_lowercase().cmp(&b.player.to_lowercase()))
    });
    leaders.truncate(MAX_LEADERS);
    leaders
}

fn avg(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

const GAME_ID_KEYS: &[&str] = &["gameId", "GAME_ID", "GAME ID"];
const TEAM_KEYS: &[&str] = &["team", "TEAM", "Team"];
const HOME_TEAM_KEYS: &[&str] = &["homeTeam", "HOME_TEAM", "HOME TEAM"];
const AWAY_TEAM_KEYS: &[&str] = &["awayTeam", "AWAY_TEAM", "AWAY TEAM"];
const HOME_POINTS_KEYS: &[&str] = &["homePoints", "PTS_FOR", "PTS"];
const AWAY_POINTS_KEYS: &[&str] = &["awayPoints", "PTS_AGAINST", "OPP_PTS"];
const TEAM_DATE_KEYS: &[&str] = &["GAME_DATE"];

/// One game from the team feed, home-side points first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGameRow {
    pub game_id: Option<String>,
    pub date: NaiveDate,
    pub team: String,
    pub home_team: String,
    pub away_team: String,
    pub home_points: u32,
    pub away_points: u32,
}

impl TeamGameRow {
    fn group_key(&self) -> String {
        self.game_id
            .clone()
            .unwrap_or_else(|| format!("{}-{}-{}", self.home_team, self.away_team, self.date))
    }

    fn involves(&self, team: &str) -> bool {
        eq_fold(&self.team, team) || eq_fold(&self.home_team, team) || eq_fold(&self.away_team, team)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedTeamFeed {
    pub rows: Vec<TeamGameRow>,
    pub rejected: Vec<Rejection>,
}

pub fn normalize_team_feed(root: &Value) -> Result<NormalizedTeamFeed> {
    let Some(records) = root.as_array() else {
        return Err(StatError::NotACollection(json_kind(root)));
    };
    let mut out = NormalizedTeamFeed::default();
    for (index, record) in records.iter().enumerate() {
        match normalize_team_row(record) {
            Ok(row) => out.rows.push(row),
            Err(issue) => out.rejected.push(Rejection { index, issue }),
        }
    }
    debug!(
        input = records.len(),
        normalized = out.rows.len(),
        rejected = out.rejected.len(),
        "normalized team game rows"
    );
    Ok(out)
}

pub fn normalize_team_row(record: &Value) -> std::result::Result<TeamGameRow, RowIssue> {
    if !record.is_object() {
        return Err(RowIssue::NotAnObject);
    }
    let date = pick_value(record, TEAM_DATE_KEYS)
        .or_else(|| pick_value(record, DATE_KEYS))
        .and_then(parse_game_date)
        .ok_or(RowIssue::UnparseableDate)?;
    Ok(TeamGameRow {
        game_id: pick_text(record, GAME_ID_KEYS),
        date,
        team: pick_text(record, TEAM_KEYS).unwrap_or_default(),
        home_team: pick_text(record, HOME_TEAM_KEYS).unwrap_or_default(),
        away_team: pick_text(record, AWAY_TEAM_KEYS).unwrap_or_default(),
        home_points: pick_count(record, HOME_POINTS_KEYS),
        away_points: pick_count(record, AWAY_POINTS_KEYS),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}

impl Outcome {
    pub fn from_score(team_points: u32, opponent_points: u32) -> Self {
        match team_points.cmp(&opponent_points) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResult {
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
    pub team_points: u32,
    pub opponent_points: u32,
    pub outcome: Outcome,
}

/// The team's last ten games, oldest first. Repeated game ids keep the last
/// row seen.
pub fn recent_results(games: &[TeamGameRow], team: &str) -> Vec<TeamResult> {
    if team.trim().is_empty() {
        return Vec::new();
    }
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<&TeamGameRow> = Vec::new();
    for game in games.iter().filter(|g| g.involves(team)) {
        let key = game.group_key();
        match slots.get(&key) {
            Some(idx) => latest[*idx] = game,
            None => {
                slots.insert(key, latest.len());
                latest.push(game);
            }
        }
    }

    let mut results: Vec<TeamResult> = latest
        .into_iter()
        .map(|game| {
            let is_home = eq_fold(&game.home_team, team);
            let (opponent, team_points, opponent_points) = if is_home {
                (&game.away_team, game.home_points, game.away_points)
            } else {
                (&game.home_team, game.away_points, game.home_points)
            };
            TeamResult {
                date: game.date,
                opponent: opponent.clone(),
                venue: if is_home { Venue::Home } else { Venue::Road },
                team_points,
                opponent_points,
                outcome: Outcome::from_score(team_points, opponent_points),
            }
        })
        .collect();
    results.sort_by(|a, b| a.date.cmp(&b.date));
    let skip = results.len().saturating_sub(RECENT_RESULTS);
    results.drain(..skip);
    results
}

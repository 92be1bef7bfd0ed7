use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::game_log::GameLogRow;

/// Opponent value that disables the opponent filter.
pub const ALL_OPPONENTS: &str = "All Opponents";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub player: String,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub since: Option<NaiveDate>,
    #[serde(default)]
    pub until: Option<NaiveDate>,
}

impl Selection {
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            player: name.into(),
            ..Self::default()
        }
    }

    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// The opponent filter, if one is actually in effect.
    pub fn opponent_filter(&self) -> Option<&str> {
        self.opponent
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty() && !o.eq_ignore_ascii_case(ALL_OPPONENTS))
    }

    fn matches(&self, row: &GameLogRow, player: &str) -> bool {
        if !eq_fold(&row.player_name, player) {
            return false;
        }
        if let Some(opponent) = self.opponent_filter() {
            if !eq_fold(&row.opponent_team, opponent) {
                return false;
            }
        }
        if let Some(team) = self.team.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            if !eq_fold(&row.own_team, team) {
                return false;
            }
        }
        if self.since.is_some_and(|since| row.date < since) {
            return false;
        }
        if self.until.is_some_and(|until| row.date > until) {
            return false;
        }
        true
    }
}

/// Rows for one player, in input order. An empty player name selects nothing.
pub fn select<'a>(rows: &'a [GameLogRow], selection: &Selection) -> Vec<&'a GameLogRow> {
    let player = selection.player.trim();
    if player.is_empty() {
        return Vec::new();
    }
    rows.iter().filter(|row| selection.matches(row, player)).collect()
}

pub fn filter_opponent<'a>(rows: &[&'a GameLogRow], opponent: &str) -> Vec<&'a GameLogRow> {
    let opponent = opponent.trim();
    rows.iter()
        .copied()
        .filter(|row| eq_fold(&row.opponent_team, opponent))
        .collect()
}

pub fn team_rows<'a>(rows: &'a [GameLogRow], team: &str) -> Vec<&'a GameLogRow> {
    let team = team.trim();
    if team.is_empty() {
        return Vec::new();
    }
    rows.iter().filter(|row| eq_fold(&row.own_team, team)).collect()
}

/// Team -> sorted, unique player names.
pub fn rosters(rows: &[GameLogRow]) -> BTreeMap<String, Vec<String>> {
    let mut by_team: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for row in rows {
        if row.own_team.is_empty() || row.player_name.is_empty() {
            continue;
        }
        by_team
            .entry(row.own_team.clone())
            .or_default()
            .insert(row.player_name.clone());
    }
    by_team
        .into_iter()
        .map(|(team, players)| {
            let mut players: Vec<String> = players.into_iter().collect();
            players.sort_by_key(|p| p.to_lowercase());
            (team, players)
        })
        .collect()
}

pub fn teams(rows: &[GameLogRow]) -> Vec<String> {
    sorted_unique(rows.iter().map(|row| row.own_team.as_str()))
}

pub fn opponents(rows: &[GameLogRow]) -> Vec<String> {
    sorted_unique(rows.iter().map(|row| row.opponent_team.as_str()))
}

fn sorted_unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<&str> = names.filter(|n| !n.is_empty()).collect();
    let mut out: Vec<String> = set.into_iter().map(str::to_string).collect();
    out.sort_by_key(|n| n.to_lowercase());
    out
}

pub(crate) fn eq_fold(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

use serde::Serialize;

use crate::aggregate::{GameWindow, RecentGames};
use crate::game_log::{GameLogRow, Stat};
use crate::select::{Selection, rosters, select};

pub const BET_STATS: [Stat; 4] = [Stat::Points, Stat::Rebounds, Stat::Assists, Stat::ThreeMade];
pub const PLAYERS_PER_TEAM: usize = 5;
pub const MAX_BEST_BETS: usize = 5;
pub const MIN_GAMES: usize = 3;

const HOME_FACTOR: f64 = 1.05;
const AWAY_FACTOR: f64 = 0.95;
const CONFIDENCE_FLOOR: f64 = 70.0;
const CONFIDENCE_CEIL: f64 = 99.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 90.0 {
            ConfidenceTier::High
        } else if confidence >= 80.0 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartBet {
    pub player: String,
    pub team: String,
    pub stat: Stat,
    pub is_home: bool,
    pub projected: f64,
    /// Over line, on the half point.
    pub line: f64,
    /// Share of the last ten games that went over the line.
    pub hit_rate: f64,
    pub confidence: f64,
    pub tier: ConfidenceTier,
}

/// Nearest half point, halves rounding up.
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0 + 0.5).floor() / 2.0
}

pub fn bet_for(games: &RecentGames<'_>, stat: Stat, is_home: bool) -> Option<SmartBet> {
    if games.len() < MIN_GAMES {
        return None;
    }
    let latest = games.rows().first()?;
    let projected = games.weighted_projection().get(stat);
    let factor = if is_home { HOME_FACTOR } else { AWAY_FACTOR };
    let line = round_to_half(projected * factor);

    let sample = games.window(GameWindow::Last(10));
    let overs = sample
        .iter()
        .filter(|row| row.stat(stat) as f64 > line)
        .count();
    let hit_rate = overs as f64 / sample.len() as f64;
    let confidence = (CONFIDENCE_FLOOR + 29.0 * hit_rate).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEIL);

    Some(SmartBet {
        player: latest.player_name.clone(),
        team: latest.own_team.clone(),
        stat,
        is_home,
        projected,
        line,
        hit_rate,
        confidence,
        tier: ConfidenceTier::from_confidence(confidence),
    })
}

/// Bets for the five most-used players on `team`.
pub fn team_bets(rows: &[GameLogRow], team: &str, is_home: bool) -> Vec<SmartBet> {
    let roster = rosters(rows)
        .into_iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(team.trim()))
        .map(|(_, players)| players)
        .unwrap_or_default();

    let mut players: Vec<RecentGames<'_>> = roster
        .iter()
        .map(|player| RecentGames::new(select(rows, &Selection::player(player.clone()).with_team(team))))
        .filter(|games| games.len() >= MIN_GAMES)
        .collect();
    // Stable: roster order (by name) breaks ties on games played.
    players.sort_by(|a, b| b.len().cmp(&a.len()));
    players.truncate(PLAYERS_PER_TEAM);

    players
        .iter()
        .flat_map(|games| BET_STATS.iter().filter_map(move |stat| bet_for(games, *stat, is_home)))
        .collect()
}

/// Best five bets across both sides of a matchup, highest confidence first.
pub fn best_bets(rows: &[GameLogRow], home: &str, away: &str) -> Vec<SmartBet> {
    let mut bets = Vec::new();
    if !home.trim().is_empty() {
        bets.extend(team_bets(rows, home, true));
    }
    if !away.trim().is_empty() {
        bets.extend(team_bets(rows, away, false));
    }
    bets.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    bets.truncate(MAX_BEST_BETS);
    bets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_point_rounding() {
        assert_eq!(round_to_half(21.0), 21.0);
        assert_eq!(round_to_half(21.2), 21.0);
        assert_eq!(round_to_half(21.3), 21.5);
        assert_eq!(round_to_half(21.75), 22.0);
    }

    #[test]
    fn tiers() {
        assert_eq!(ConfidenceTier::from_confidence(95.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(80.0), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(70.0), ConfidenceTier::Low);
    }
}

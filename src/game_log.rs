use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The six box-score stats every normalized row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Points,
    Rebounds,
    Assists,
    ThreeMade,
    Steals,
    Blocks,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Points,
        Stat::Rebounds,
        Stat::Assists,
        Stat::ThreeMade,
        Stat::Steals,
        Stat::Blocks,
    ];

    /// Column label used by the dashboard tables.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Points => "PTS",
            Stat::Rebounds => "REB",
            Stat::Assists => "AST",
            Stat::ThreeMade => "3PM",
            Stat::Steals => "STL",
            Stat::Blocks => "BLK",
        }
    }

    pub fn from_label(raw: &str) -> Option<Stat> {
        let s = raw.trim().to_ascii_lowercase();
        match s.as_str() {
            "pts" | "points" => Some(Stat::Points),
            "reb" | "rebounds" | "tot" => Some(Stat::Rebounds),
            "ast" | "assists" => Some(Stat::Assists),
            "3pm" | "3p" | "threes" | "threemade" => Some(Stat::ThreeMade),
            "stl" | "steals" => Some(Stat::Steals),
            "blk" | "blocks" => Some(Stat::Blocks),
            _ => None,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "R")]
    Road,
    #[serde(rename = "N")]
    Neutral,
}

impl Venue {
    pub fn from_code(raw: &str) -> Option<Venue> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "H" | "HOME" => Some(Venue::Home),
            "R" | "A" | "ROAD" | "AWAY" => Some(Venue::Road),
            "N" | "NEUTRAL" => Some(Venue::Neutral),
            _ => None,
        }
    }
}

/// One player's single-game record after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLogRow {
    pub date: NaiveDate,
    pub player_name: String,
    pub own_team: String,
    pub opponent_team: String,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub three_made: u32,
    pub steals: u32,
    pub blocks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
}

impl GameLogRow {
    pub fn stat(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Points => self.points,
            Stat::Rebounds => self.rebounds,
            Stat::Assists => self.assists,
            Stat::ThreeMade => self.three_made,
            Stat::Steals => self.steals,
            Stat::Blocks => self.blocks,
        }
    }

    pub fn set_stat(&mut self, stat: Stat, value: u32) {
        match stat {
            Stat::Points => self.points = value,
            Stat::Rebounds => self.rebounds = value,
            Stat::Assists => self.assists = value,
            Stat::ThreeMade => self.three_made = value,
            Stat::Steals => self.steals = value,
            Stat::Blocks => self.blocks = value,
        }
    }
}

/// Per-stat floating point values (averages, projections).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLine {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub three_made: f64,
    pub steals: f64,
    pub blocks: f64,
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Points => self.points,
            Stat::Rebounds => self.rebounds,
            Stat::Assists => self.assists,
            Stat::ThreeMade => self.three_made,
            Stat::Steals => self.steals,
            Stat::Blocks => self.blocks,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Points => &mut self.points,
            Stat::Rebounds => &mut self.rebounds,
            Stat::Assists => &mut self.assists,
            Stat::ThreeMade => &mut self.three_made,
            Stat::Steals => &mut self.steals,
            Stat::Blocks => &mut self.blocks,
        }
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> StatLine {
        let mut out = StatLine::default();
        for stat in Stat::ALL {
            *out.get_mut(stat) = f(self.get(stat));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_labels_round_trip() {
        for stat in Stat::ALL {
            assert_eq!(Stat::from_label(stat.label()), Some(stat));
        }
        assert_eq!(Stat::from_label("tot"), Some(Stat::Rebounds));
        assert_eq!(Stat::from_label("xyz"), None);
    }

    #[test]
    fn venue_codes() {
        assert_eq!(Venue::from_code("h"), Some(Venue::Home));
        assert_eq!(Venue::from_code(" R "), Some(Venue::Road));
        assert_eq!(Venue::from_code("N"), Some(Venue::Neutral));
        assert_eq!(Venue::from_code(""), None);
    }
}

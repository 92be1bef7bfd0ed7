use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::game_log::{GameLogRow, Stat, StatLine};
use crate::select::{Selection, filter_opponent, select};

/// Recency weights for the next-game projection, most recent game first.
pub const PROJECTION_WEIGHTS: [f64; 10] = [0.25, 0.20, 0.15, 0.12, 0.10, 0.08, 0.05, 0.03, 0.015, 0.015];
pub const PROJECTION_FLOOR_WEIGHT: f64 = 0.015;
pub const PROJECTION_GAMES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameWindow {
    Last(usize),
    Season,
}

impl GameWindow {
    pub const STANDARD: [GameWindow; 5] = [
        GameWindow::Last(1),
        GameWindow::Last(3),
        GameWindow::Last(5),
        GameWindow::Last(10),
        GameWindow::Season,
    ];

    pub fn limit(self, available: usize) -> usize {
        match self {
            GameWindow::Last(n) => n.min(available),
            GameWindow::Season => available,
        }
    }
}

impl fmt::Display for GameWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWindow::Last(n) => write!(f, "L{n}"),
            GameWindow::Season => f.write_str("Season"),
        }
    }
}

/// Arithmetic means over a set of games. With no games every value is 0 and
/// `insufficient_data` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSummary {
    pub games: usize,
    pub insufficient_data: bool,
    pub values: StatLine,
}

impl StatSummary {
    pub fn no_data() -> Self {
        Self {
            games: 0,
            insufficient_data: true,
            values: StatLine::default(),
        }
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.values.get(stat)
    }

    /// Display value: one decimal, or "-" when there is nothing to show.
    pub fn display(&self, stat: Stat) -> String {
        if self.insufficient_data {
            "-".to_string()
        } else {
            format_stat(self.get(stat))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub games: usize,
    /// Sum of the weights actually applied; the divisor of the weighted mean.
    pub weight_sum: f64,
    pub insufficient_data: bool,
    pub values: StatLine,
}

impl Projection {
    pub fn get(&self, stat: Stat) -> f64 {
        self.values.get(stat)
    }
}

pub fn mean(rows: &[&GameLogRow]) -> StatSummary {
    if rows.is_empty() {
        return StatSummary::no_data();
    }
    let mut sums = StatLine::default();
    for row in rows {
        for stat in Stat::ALL {
            *sums.get_mut(stat) += row.stat(stat) as f64;
        }
    }
    let n = rows.len() as f64;
    StatSummary {
        games: rows.len(),
        insufficient_data: false,
        values: sums.map(|total| total / n),
    }
}

/// A player's games ordered most recent first. Equal dates keep their input
/// order.
#[derive(Debug, Clone, Default)]
pub struct RecentGames<'a> {
    rows: Vec<&'a GameLogRow>,
}

impl<'a> RecentGames<'a> {
    pub fn new(mut rows: Vec<&'a GameLogRow>) -> Self {
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Self { rows }
    }

    pub fn rows(&self) -> &[&'a GameLogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|row| row.date)
    }

    pub fn window(&self, window: GameWindow) -> &[&'a GameLogRow] {
        &self.rows[..window.limit(self.rows.len())]
    }

    pub fn average_over(&self, n: usize) -> StatSummary {
        mean(self.window(GameWindow::Last(n)))
    }

    pub fn season_average(&self) -> StatSummary {
        mean(&self.rows)
    }

    pub fn weighted_projection(&self) -> Projection {
        let games = self.window(GameWindow::Last(PROJECTION_GAMES));
        if games.is_empty() {
            return Projection {
                games: 0,
                weight_sum: 0.0,
                insufficient_data: true,
                values: StatLine::default(),
            };
        }
        let mut weighted = StatLine::default();
        let mut weight_sum = 0.0;
        for (idx, row) in games.iter().enumerate() {
            let w = PROJECTION_WEIGHTS
                .get(idx)
                .copied()
                .unwrap_or(PROJECTION_FLOOR_WEIGHT);
            for stat in Stat::ALL {
                *weighted.get_mut(stat) += row.stat(stat) as f64 * w;
            }
            weight_sum += w;
        }
        Projection {
            games: games.len(),
            weight_sum,
            insufficient_data: false,
            values: weighted.map(|total| total / weight_sum),
        }
    }
}

pub fn vs_opponent_average(rows: &[&GameLogRow], opponent: &str) -> StatSummary {
    mean(&filter_opponent(rows, opponent))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub window: GameWindow,
    pub summary: StatSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub player: String,
    pub team: String,
    pub games: usize,
    pub latest_date: Option<NaiveDate>,
    pub windows: Vec<WindowSummary>,
    pub projection: Projection,
    pub opponent: Option<String>,
    pub vs_opponent: Option<StatSummary>,
    /// The same windows over games against `opponent` only.
    pub vs_windows: Option<Vec<WindowSummary>>,
    pub vs_projection: Option<Projection>,
    pub recent: Vec<GameLogRow>,
}

impl PlayerReport {
    pub fn window(&self, window: GameWindow) -> Option<&StatSummary> {
        self.windows
            .iter()
            .find(|w| w.window == window)
            .map(|w| &w.summary)
    }

    pub fn vs_window(&self, window: GameWindow) -> Option<&StatSummary> {
        self.vs_windows
            .as_ref()?
            .iter()
            .find(|w| w.window == window)
            .map(|w| &w.summary)
    }
}

fn window_summaries(games: &RecentGames<'_>) -> Vec<WindowSummary> {
    GameWindow::STANDARD
        .iter()
        .map(|window| WindowSummary {
            window: *window,
            summary: mean(games.window(*window)),
        })
        .collect()
}

/// Trend panel for one player. `windows` and `projection` cover every
/// opponent; an opponent in the selection adds the same windows and a
/// projection narrowed to that opponent.
pub fn player_report(rows: &[GameLogRow], selection: &Selection) -> PlayerReport {
    let opponent = selection.opponent_filter().map(str::to_string);
    let mut base = selection.clone();
    base.opponent = None;
    let games = RecentGames::new(select(rows, &base));

    let windows = window_summaries(&games);
    let vs_opponent = opponent
        .as_deref()
        .map(|opp| vs_opponent_average(games.rows(), opp));
    let vs_games = opponent
        .as_ref()
        .map(|_| RecentGames::new(select(rows, selection)));

    PlayerReport {
        player: games
            .rows()
            .first()
            .map(|row| row.player_name.clone())
            .unwrap_or_else(|| selection.player.trim().to_string()),
        team: games
            .rows()
            .first()
            .map(|row| row.own_team.clone())
            .unwrap_or_default(),
        games: games.len(),
        latest_date: games.latest_date(),
        windows,
        projection: games.weighted_projection(),
        opponent,
        vs_opponent,
        vs_windows: vs_games.as_ref().map(window_summaries),
        vs_projection: vs_games.as_ref().map(RecentGames::weighted_projection),
        recent: games
            .window(GameWindow::Last(PROJECTION_GAMES))
            .iter()
            .map(|row| (*row).clone())
            .collect(),
    }
}

/// Round half up to one decimal place. Presentation only.
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    // 1.45 is stored as 1.4499..., nudge it back over the half.
    let scaled = value * 10.0;
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5 + 1e-9).floor()
    } else {
        -((-scaled + 0.5 - 1e-9).floor())
    };
    rounded / 10.0
}

pub fn format_stat(value: f64) -> String {
    format!("{:.1}", round_one_decimal(value))
}

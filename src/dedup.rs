use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::game_log::GameLogRow;

/// Identity used to collapse repeated game entries from overlapping feeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub date: NaiveDate,
    pub own_team: String,
    pub opponent_team: String,
    pub player: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupScope {
    /// One row per (date, own team, opponent).
    #[default]
    Game,
    /// One row per (date, own team, opponent, player).
    PerPlayer,
}

impl DedupKey {
    pub fn for_row(row: &GameLogRow, scope: DedupScope) -> Self {
        Self {
            date: row.date,
            own_team: fold(&row.own_team),
            opponent_team: fold(&row.opponent_team),
            player: match scope {
                DedupScope::Game => None,
                DedupScope::PerPlayer => Some(fold(&row.player_name)),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DedupOutcome {
    pub rows: Vec<GameLogRow>,
    pub total_input: usize,
    pub retained: usize,
    pub missing_fields: usize,
    pub duplicates: usize,
}

/// Rows without both team names cannot be placed in a matchup.
pub fn has_required_fields(row: &GameLogRow) -> bool {
    !row.own_team.trim().is_empty() && !row.opponent_team.trim().is_empty()
}

pub fn deduplicate(rows: Vec<GameLogRow>) -> DedupOutcome {
    deduplicate_with(rows, DedupScope::Game)
}

/// Keeps the first row seen for each key, in input order.
pub fn deduplicate_with(rows: Vec<GameLogRow>, scope: DedupScope) -> DedupOutcome {
    let total_input = rows.len();
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(total_input);
    let mut kept = Vec::with_capacity(total_input);
    let mut missing_fields = 0usize;
    let mut duplicates = 0usize;

    for row in rows {
        if !has_required_fields(&row) {
            missing_fields += 1;
            continue;
        }
        if seen.insert(DedupKey::for_row(&row, scope)) {
            kept.push(row);
        } else {
            duplicates += 1;
        }
    }

    debug!(
        total_input,
        retained = kept.len(),
        missing_fields,
        duplicates,
        ?scope,
        "deduplicated game log rows"
    );
    DedupOutcome {
        retained: kept.len(),
        rows: kept,
        total_input,
        missing_fields,
        duplicates,
    }
}

fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

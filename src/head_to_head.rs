use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::game_log::GameLogRow;
use crate::select::eq_fold;

pub const MAX_H2H_GROUPS: usize = 5;

/// Every per-player row from one game between the two teams.
#[derive(Debug, Clone, Serialize)]
pub struct HeadToHeadGroup<'a> {
    pub date: NaiveDate,
    pub roster: Vec<&'a GameLogRow>,
}

pub fn is_pairing(row: &GameLogRow, team_a: &str, team_b: &str) -> bool {
    (eq_fold(&row.own_team, team_a) && eq_fold(&row.opponent_team, team_b))
        || (eq_fold(&row.own_team, team_b) && eq_fold(&row.opponent_team, team_a))
}

/// Up to five most recent game dates between `team_a` and `team_b`, newest
/// first. Rosters keep input order.
pub fn head_to_head<'a>(rows: &'a [GameLogRow], team_a: &str, team_b: &str) -> Vec<HeadToHeadGroup<'a>> {
    if team_a.trim().is_empty() || team_b.trim().is_empty() {
        return Vec::new();
    }
    let mut groups: Vec<HeadToHeadGroup<'a>> = Vec::new();
    let mut by_date: HashMap<NaiveDate, usize> = HashMap::new();
    for row in rows.iter().filter(|row| is_pairing(row, team_a, team_b)) {
        let idx = *by_date.entry(row.date).or_insert_with(|| {
            groups.push(HeadToHeadGroup {
                date: row.date,
                roster: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].roster.push(row);
    }
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups.truncate(MAX_H2H_GROUPS);
    groups
}

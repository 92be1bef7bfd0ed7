use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::aggregate::{PlayerReport, RecentGames, player_report};
use crate::dedup::{DedupScope, deduplicate_with};
use crate::error::Result;
use crate::game_log::{GameLogRow, Stat};
use crate::head_to_head::{HeadToHeadGroup, head_to_head};
use crate::normalize::{Rejection, normalize_feed};
use crate::select::{Selection, opponents, rosters, select, teams};
use crate::smart_bets::{self, SmartBet};
use crate::team_insights::{self, LeaderRow};
use crate::team_names;

/// Counts from one ingest, for logs and `--json` output.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub total_input: usize,
    pub normalized: usize,
    pub retained: usize,
    pub missing_fields: usize,
    pub duplicates: usize,
    pub before_season_start: usize,
    pub rejected: Vec<Rejection>,
}

/// One normalized, deduplicated player feed. Every query is a pure function
/// of the rows held here; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct StatAggregator {
    rows: Vec<GameLogRow>,
    report: IngestReport,
}

impl StatAggregator {
    pub fn from_feed(root: &Value) -> Result<Self> {
        Self::from_feed_since(root, None)
    }

    /// Like `from_feed`, dropping games before `season_start`.
    pub fn from_feed_since(root: &Value, season_start: Option<NaiveDate>) -> Result<Self> {
        let normalized = normalize_feed(root)?;
        let total_input = normalized.rows.len() + normalized.rejected.len();
        let normalized_count = normalized.rows.len();

        let mut rows = normalized.rows;
        let mut before_season_start = 0usize;
        if let Some(start) = season_start {
            let before = rows.len();
            rows.retain(|row| row.date >= start);
            before_season_start = before - rows.len();
        }

        let outcome = deduplicate_with(rows, DedupScope::PerPlayer);
        let report = IngestReport {
            total_input,
            normalized: normalized_count,
            retained: outcome.retained,
            missing_fields: outcome.missing_fields,
            duplicates: outcome.duplicates,
            before_season_start,
            rejected: normalized.rejected,
        };
        info!(
            total = report.total_input,
            retained = report.retained,
            rejected = report.rejected.len(),
            duplicates = report.duplicates,
            "player feed ingested"
        );
        Ok(Self {
            rows: outcome.rows,
            report,
        })
    }

    pub fn rows(&self) -> &[GameLogRow] {
        &self.rows
    }

    pub fn ingest_report(&self) -> &IngestReport {
        &self.report
    }

    pub fn teams(&self) -> Vec<String> {
        teams(&self.rows)
    }

    pub fn opponents(&self) -> Vec<String> {
        opponents(&self.rows)
    }

    pub fn rosters(&self) -> BTreeMap<String, Vec<String>> {
        rosters(&self.rows)
    }

    /// Feed spelling for a user-supplied team name ("Boston Celtics" -> "Celtics").
    pub fn resolve_team(&self, name: &str) -> String {
        let known = self.teams();
        let mut candidates = known.iter().map(String::as_str).collect::<Vec<_>>();
        let opponents = self.opponents();
        candidates.extend(opponents.iter().map(String::as_str));
        team_names::resolve_against(name, candidates)
    }

    pub fn select(&self, selection: &Selection) -> Vec<&GameLogRow> {
        select(&self.rows, selection)
    }

    pub fn recent_games(&self, selection: &Selection) -> RecentGames<'_> {
        RecentGames::new(self.select(selection))
    }

    pub fn player_report(&self, selection: &Selection) -> PlayerReport {
        player_report(&self.rows, selection)
    }

    /// Reports for every rostered player on `team`, computed in parallel and
    /// returned in roster order.
    pub fn team_reports(&self, team: &str) -> Vec<PlayerReport> {
        let roster = self
            .rosters()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(team.trim()))
            .map(|(_, players)| players)
            .unwrap_or_default();
        roster
            .par_iter()
            .map(|player| {
                let selection = Selection::player(player.clone()).with_team(team);
                player_report(&self.rows, &selection)
            })
            .collect()
    }

    pub fn head_to_head(&self, team_a: &str, team_b: &str) -> Vec<HeadToHeadGroup<'_>> {
        head_to_head(&self.rows, team_a, team_b)
    }

    pub fn stat_leaders(&self, team: &str, stat: Stat) -> Vec<LeaderRow> {
        team_insights::stat_leaders(&self.rows, team, stat)
    }

    pub fn best_bets(&self, home: &str, away: &str) -> Vec<SmartBet> {
        smart_bets::best_bets(&self.rows, home, away)
    }
}

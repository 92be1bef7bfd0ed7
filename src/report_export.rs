use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aggregate::{GameWindow, PlayerReport, format_stat};
use crate::game_log::Stat;
use crate::team_insights::LeaderRow;

pub struct ExportReport {
    pub players: usize,
    pub leader_rows: usize,
    pub game_rows: usize,
}

/// Write one team's trend panels to an xlsx workbook with `Players`,
/// `Leaders` and `RecentGames` sheets.
pub fn export_team_workbook(
    path: &Path,
    team: &str,
    reports: &[PlayerReport],
    leaders: &[(Stat, Vec<LeaderRow>)],
) -> Result<ExportReport> {
    let mut players_rows = vec![players_header()];
    for report in reports {
        players_rows.push(player_row(report));
    }

    let mut leader_rows = vec![vec![
        "Team".to_string(),
        "Stat".to_string(),
        "Rank".to_string(),
        "Player".to_string(),
        "Home Avg".to_string(),
        "Road Avg".to_string(),
        "Home GP".to_string(),
        "Road GP".to_string(),
    ]];
    for (stat, rows) in leaders {
        for (idx, row) in rows.iter().enumerate() {
            leader_rows.push(vec![
                team.to_string(),
                stat.label().to_string(),
                (idx + 1).to_string(),
                row.player.clone(),
                format_stat(row.home_avg),
                format_stat(row.road_avg),
                row.home_games.to_string(),
                row.road_games.to_string(),
            ]);
        }
    }

    let mut game_rows = vec![vec![
        "Player".to_string(),
        "Date".to_string(),
        "Team".to_string(),
        "Opponent".to_string(),
        "PTS".to_string(),
        "REB".to_string(),
        "AST".to_string(),
        "3PM".to_string(),
        "STL".to_string(),
        "BLK".to_string(),
    ]];
    for report in reports {
        for game in &report.recent {
            let mut row = vec![
                game.player_name.clone(),
                game.date.format("%Y-%m-%d").to_string(),
                game.own_team.clone(),
                game.opponent_team.clone(),
            ];
            row.extend(Stat::ALL.iter().map(|stat| game.stat(*stat).to_string()));
            game_rows.push(row);
        }
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        write_rows(sheet, &players_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Leaders")?;
        write_rows(sheet, &leader_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("RecentGames")?;
        write_rows(sheet, &game_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: players_rows.len().saturating_sub(1),
        leader_rows: leader_rows.len().saturating_sub(1),
        game_rows: game_rows.len().saturating_sub(1),
    })
}

fn players_header() -> Vec<String> {
    let mut header = vec!["Player".to_string(), "Team".to_string(), "GP".to_string()];
    for window in GameWindow::STANDARD {
        for stat in Stat::ALL {
            header.push(format!("{window} {stat}"));
        }
    }
    for stat in Stat::ALL {
        header.push(format!("Proj {stat}"));
    }
    header
}

fn player_row(report: &PlayerReport) -> Vec<String> {
    let mut row = vec![
        report.player.clone(),
        report.team.clone(),
        report.games.to_string(),
    ];
    for window in GameWindow::STANDARD {
        for stat in Stat::ALL {
            row.push(
                report
                    .window(window)
                    .map(|summary| summary.display(stat))
                    .unwrap_or_default(),
            );
        }
    }
    for stat in Stat::ALL {
        row.push(if report.projection.insufficient_data {
            "-".to_string()
        } else {
            format_stat(report.projection.get(stat))
        });
    }
    row
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

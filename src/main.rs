use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use statsnap::aggregate::{GameWindow, PlayerReport, format_stat};
use statsnap::config::{Config, parse_cli_date};
use statsnap::feed_fetch::{fetch_player_feed, fetch_team_feed, read_feed_file};
use statsnap::game_log::Stat;
use statsnap::report_export::export_team_workbook;
use statsnap::select::Selection;
use statsnap::team_insights::{
    LeaderRow, TeamGameRow, TeamResult, normalize_team_feed, recent_results,
};
use statsnap::StatAggregator;

#[derive(Debug, Parser)]
#[command(name = "statsnap", about = "Player trends, head-to-heads and prop lines from NBA game logs")]
struct Cli {
    /// Read the player game-log feed from a JSON file instead of the API.
    #[arg(long, global = true)]
    feed: Option<PathBuf>,

    /// Read the team game feed from a JSON file instead of the API.
    #[arg(long, global = true)]
    team_feed: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Trend panel for one player.
    Player {
        name: String,
        #[arg(long)]
        opponent: Option<String>,
        #[arg(long)]
        team: Option<String>,
        /// Ignore games before this date.
        #[arg(long)]
        since: Option<String>,
    },
    /// Most recent games between two teams.
    H2h { team_a: String, team_b: String },
    /// Stat leaders, last ten results and roster trends for a team.
    Team { team: String },
    /// Best prop lines for a matchup.
    Bets { home: String, away: String },
    /// Write a team workbook (xlsx).
    Export {
        path: PathBuf,
        #[arg(long)]
        team: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statsnap=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        feed,
        team_feed,
        json,
        command,
    } = Cli::parse();
    let cfg = Config::from_env();

    let feed = match &feed {
        Some(path) => read_feed_file(path)?,
        None => fetch_player_feed(&cfg)?,
    };
    let engine = StatAggregator::from_feed_since(&feed, cfg.season_start)
        .context("player feed is not a list of rows")?;

    match command {
        Command::Player {
            name,
            opponent,
            team,
            since,
        } => {
            let mut selection = Selection::player(name);
            if let Some(opponent) = opponent {
                selection = selection.with_opponent(engine.resolve_team(&opponent));
            }
            if let Some(team) = team {
                selection = selection.with_team(engine.resolve_team(&team));
            }
            if let Some(since) = since {
                selection = selection.since(parse_cli_date(&since)?);
            }
            let report = engine.player_report(&selection);
            if json {
                return print_json(&report);
            }
            print_player_report(&report);
        }
        Command::H2h { team_a, team_b } => {
            let team_a = engine.resolve_team(&team_a);
            let team_b = engine.resolve_team(&team_b);
            let groups = engine.head_to_head(&team_a, &team_b);
            if json {
                return print_json(&groups);
            }
            if groups.is_empty() {
                println!("No games between {team_a} and {team_b}");
            }
            for group in &groups {
                println!("{team_a} vs {team_b} - {}", group.date.format("%b %-d, %Y"));
                for row in &group.roster {
                    println!(
                        "  {:<26} {:<14} {:>3} PTS {:>3} REB {:>3} AST",
                        row.player_name, row.own_team, row.points, row.rebounds, row.assists
                    );
                }
            }
        }
        Command::Team { team } => {
            let team = engine.resolve_team(&team);
            let leaders: Vec<_> = Stat::ALL
                .iter()
                .map(|stat| (*stat, engine.stat_leaders(&team, *stat)))
                .collect();
            let results = match load_team_feed(team_feed.as_deref(), &cfg) {
                Ok(games) => recent_results(&games, &team),
                Err(err) => {
                    tracing::warn!(error = %err, "team feed unavailable");
                    Vec::new()
                }
            };
            let reports = engine.team_reports(&team);
            if json {
                #[derive(Serialize)]
                struct TeamView<'a> {
                    team: &'a str,
                    leaders: &'a [(Stat, Vec<LeaderRow>)],
                    results: &'a [TeamResult],
                    players: &'a [PlayerReport],
                }
                return print_json(&TeamView {
                    team: &team,
                    leaders: &leaders,
                    results: &results,
                    players: &reports,
                });
            }
            for (stat, rows) in &leaders {
                println!("{team} {stat} leaders (home / road)");
                for row in rows {
                    println!(
                        "  {:<26} {:>5} / {:>5}",
                        row.player,
                        format_stat(row.home_avg),
                        format_stat(row.road_avg)
                    );
                }
            }
            if !results.is_empty() {
                println!("Last {} games", results.len());
                for game in &results {
                    println!(
                        "  {} {:?} {:<14} {:>3}-{:<3} {}",
                        game.date,
                        game.venue,
                        game.opponent,
                        game.team_points,
                        game.opponent_points,
                        game.outcome.code()
                    );
                }
            }
            for report in &reports {
                print_player_report(report);
            }
        }
        Command::Bets { home, away } => {
            let home = engine.resolve_team(&home);
            let away = engine.resolve_team(&away);
            let bets = engine.best_bets(&home, &away);
            if json {
                return print_json(&bets);
            }
            if bets.is_empty() {
                println!("Not enough games to price {away} @ {home}");
            }
            for bet in &bets {
                println!(
                    "{:<26} {:<14} {} O {:.1}  proj {}  conf {:.0}% ({:?})",
                    bet.player,
                    bet.team,
                    bet.stat,
                    bet.line,
                    format_stat(bet.projected),
                    bet.confidence,
                    bet.tier
                );
            }
        }
        Command::Export { path, team } => {
            let team = engine.resolve_team(&team);
            let reports = engine.team_reports(&team);
            let leaders: Vec<_> = Stat::ALL
                .iter()
                .map(|stat| (*stat, engine.stat_leaders(&team, *stat)))
                .collect();
            let summary = export_team_workbook(&path, &team, &reports, &leaders)?;
            println!("Export complete: {}", path.display());
            println!("Players: {}", summary.players);
            println!("Leader rows: {}", summary.leader_rows);
            println!("Recent games: {}", summary.game_rows);
        }
    }

    Ok(())
}

fn load_team_feed(path: Option<&Path>, cfg: &Config) -> Result<Vec<TeamGameRow>> {
    let raw = match path {
        Some(path) => read_feed_file(path)?,
        None => fetch_team_feed(cfg)?,
    };
    Ok(normalize_team_feed(&raw)?.rows)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn print_player_report(report: &PlayerReport) {
    if report.games == 0 {
        println!("{}: no games found", report.player);
        return;
    }
    let latest = report
        .latest_date
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default();
    println!(
        "{} ({}) - {} games, latest {}",
        report.player, report.team, report.games, latest
    );
    print!("  {:<8}", "");
    for stat in Stat::ALL {
        print!("{:>6}", stat.label());
    }
    println!();
    for window in GameWindow::STANDARD {
        let Some(summary) = report.window(window) else {
            continue;
        };
        print!("  {:<8}", window.to_string());
        for stat in Stat::ALL {
            print!("{:>6}", summary.display(stat));
        }
        println!();
    }
    print!("  {:<8}", "Proj");
    for stat in Stat::ALL {
        print!("{:>6}", format_stat(report.projection.get(stat)));
    }
    println!();
    let Some(opponent) = &report.opponent else {
        return;
    };
    let games = report.vs_opponent.map(|s| s.games).unwrap_or_default();
    println!("  vs {opponent} ({games} games)");
    for window in GameWindow::STANDARD {
        let Some(summary) = report.vs_window(window) else {
            continue;
        };
        print!("  {:<8}", window.to_string());
        for stat in Stat::ALL {
            print!("{:>6}", summary.display(stat));
        }
        println!();
    }
    if let Some(projection) = &report.vs_projection {
        print!("  {:<8}", "Proj");
        for stat in Stat::ALL {
            if projection.insufficient_data {
                print!("{:>6}", "-");
            } else {
                print!("{:>6}", format_stat(projection.get(stat)));
            }
        }
        println!();
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{StatError, json_kind};
use crate::http_client::http_client;

pub const PLAYER_FEED_PATH: &str = "/api/ab/player-feed";
pub const TEAM_FEED_PATH: &str = "/api/ab/teams";

pub fn fetch_player_feed(cfg: &Config) -> Result<Value> {
    fetch_feed(cfg, PLAYER_FEED_PATH)
}

pub fn fetch_team_feed(cfg: &Config) -> Result<Value> {
    fetch_feed(cfg, TEAM_FEED_PATH)
}

fn fetch_feed(cfg: &Config, path: &str) -> Result<Value> {
    let client = http_client(cfg.fetch_timeout)?;
    let url = format!("{}{path}", cfg.api_url);
    info!(%url, "fetching feed");

    let resp = client.get(&url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        warn!(%url, %status, "feed request failed");
        return Err(anyhow!("http {}: {}", status, body));
    }
    parse_feed_json(&body).with_context(|| format!("invalid feed from {url}"))
}

pub fn read_feed_file(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("read feed {}", path.display()))?;
    parse_feed_json(&raw).with_context(|| format!("invalid feed in {}", path.display()))
}

/// Unwraps the API envelope. Accepts a bare array or an object carrying the
/// rows under `data` or `response`; empty bodies and `null` are empty feeds.
pub fn parse_feed_json(raw: &str) -> std::result::Result<Value, StatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Value::Array(Vec::new()));
    }
    let root: Value = serde_json::from_str(trimmed)?;
    match root {
        Value::Array(_) => Ok(root),
        Value::Object(mut map) => ["data", "response"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(rows @ Value::Array(_)) => Some(rows),
                _ => None,
            })
            .ok_or(StatError::NotACollection("an object without a data array")),
        other => Err(StatError::NotACollection(json_kind(&other))),
    }
}

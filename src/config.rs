use std::time::Duration;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{Result, StatError};
use crate::normalize::parse_date_str;

pub const DEFAULT_API_URL: &str = "https://statsnap-backend.onrender.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const MIN_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub season_start: Option<NaiveDate>,
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            season_start: None,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Loads `.env.local` then `.env`, then reads `STATSNAP_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Config::default();
        if let Some(url) = lookup("STATSNAP_API_URL").filter(|v| !v.trim().is_empty()) {
            cfg.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("STATSNAP_SEASON_START").filter(|v| !v.trim().is_empty()) {
            match parse_cli_date(&raw) {
                Ok(date) => cfg.season_start = Some(date),
                Err(err) => warn!(%err, "ignoring STATSNAP_SEASON_START"),
            }
        }
        let timeout = lookup("STATSNAP_FETCH_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(MIN_TIMEOUT_SECS);
        cfg.fetch_timeout = Duration::from_secs(timeout);
        cfg
    }
}

/// Dates typed by a user go through the same strategies as feed dates.
pub fn parse_cli_date(raw: &str) -> Result<NaiveDate> {
    parse_date_str(raw).ok_or_else(|| StatError::InvalidDate(raw.trim().to_string()))
}

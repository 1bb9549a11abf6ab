// src/config.rs
//! Service configuration: endpoint URLs, timeouts, and the feed
//! date-projection policy.
//!
//! Resolution order: `$RADAR_CONFIG_PATH` (must exist when set), then
//! `config/radar.toml`, then compiled defaults. A couple of individual env
//! overrides sit on top for the knobs that get flipped in deployments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const ENV_CONFIG_PATH: &str = "RADAR_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/radar.toml";

/// Flips the project-feed-dates-to-current-year demo policy ("1"/"true"
/// or "0"/"false").
pub const ENV_PROJECT_FEED_DATES: &str = "RADAR_PROJECT_FEED_DATES";
pub const ENV_POLL_INTERVAL_SECS: &str = "RADAR_POLL_INTERVAL_SECS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Chain LCD REST endpoint (auction module state, governance).
    pub lcd_endpoint: String,
    /// Explorer indexer REST endpoint (block/paging stats).
    pub explorer_endpoint: String,
    /// Community events CMS endpoint.
    pub events_feed_url: String,
    pub feed_page_size: u32,
    pub http_timeout_secs: u64,
    /// Client-side poll cadence against /api/pulse.
    pub poll_interval_secs: u64,
    /// Where the watcher binary polls.
    pub pulse_url: String,
    /// Project feed dates onto the current year (demo policy; see README).
    pub project_feed_dates: bool,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            lcd_endpoint: "https://sentry.lcd.injective.network".into(),
            explorer_endpoint: "https://sentry.explorer.grpc-web.injective.network".into(),
            events_feed_url: "https://injective.com/api/cache/events/list".into(),
            feed_page_size: 10,
            http_timeout_secs: 10,
            poll_interval_secs: 5,
            pulse_url: "http://127.0.0.1:8000/api/pulse".into(),
            project_feed_dates: true,
        }
    }
}

impl RadarConfig {
    /// Load with the documented resolution order plus env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::from_path(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::from_path(&default)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(v) = parse_bool_env(ENV_PROJECT_FEED_DATES) {
            self.project_feed_dates = v;
        }
        if let Ok(raw) = std::env::var(ENV_POLL_INTERVAL_SECS) {
            if let Ok(secs) = raw.trim().parse::<u64>() {
                self.poll_interval_secs = secs.max(1);
            }
        }
    }
}

fn parse_bool_env(name: &str) -> Option<bool> {
    match std::env::var(name).ok()?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

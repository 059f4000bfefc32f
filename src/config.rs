// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from a JSON file, with environment
//! overrides for secrets.
//!
//! The file path comes from `ADVENT_LEADER_CONFIG` (default `config.json`).
//! Keys may be spelled camelCase, snake_case, or in the PascalCase used by
//! older config files (`URL`, `Cookie`, `BotToken`, `RoomID`, `Debug`).

use crate::services::ranker::RenderOptions;
use crate::services::spark::DEFAULT_MESSAGE_API;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "ADVENT_LEADER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

const COOKIE_VAR: &str = "ADVENT_LEADER_COOKIE";
const BOT_TOKEN_VAR: &str = "ADVENT_LEADER_BOT_TOKEN";
const DEBUG_VAR: &str = "ADVENT_LEADER_DEBUG";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Leaderboard JSON endpoint
    #[serde(default, alias = "URL")]
    pub url: String,
    /// Value of the `session` cookie
    #[serde(default, alias = "Cookie")]
    pub cookie: String,
    /// Bot access token for the messages API
    #[serde(default, alias = "BotToken", alias = "bot_token")]
    pub bot_token: String,
    /// Room that receives the reports
    #[serde(default, alias = "RoomID", alias = "room_id")]
    pub room_id: String,
    /// Post and print the report every cycle
    #[serde(default, alias = "Debug")]
    pub debug: bool,

    #[serde(default = "default_poll_interval_secs", alias = "poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_http_timeout_secs", alias = "http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_message_api", alias = "message_api")]
    pub message_api: String,

    // --- Report rendering ---
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_true", alias = "link_header")]
    pub link_header: bool,
    #[serde(default = "default_true", alias = "show_global_score")]
    pub show_global_score: bool,
}

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_message_api() -> String {
    DEFAULT_MESSAGE_API.to_string()
}

fn default_title() -> String {
    RenderOptions::default().title
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            url: "https://adventofcode.com/2018/leaderboard/private/view/12345.json".to_string(),
            cookie: "test_cookie".to_string(),
            bot_token: "test_bot_token".to_string(),
            room_id: "test_room".to_string(),
            debug: false,
            poll_interval_secs: default_poll_interval_secs(),
            http_timeout_secs: default_http_timeout_secs(),
            message_api: default_message_api(),
            title: default_title(),
            link_header: true,
            show_global_score: true,
        }
    }
}

impl Config {
    /// Load configuration the way the binary does: `.env`, then the config
    /// file, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::parse(&read_file(Path::new(&path))?)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;

        tracing::info!(path = %path, "Configuration loaded");
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json(&read_file(path.as_ref())?)
    }

    /// Parse and validate config JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(json)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(cookie) = lookup(COOKIE_VAR) {
            self.cookie = cookie.trim().to_string();
        }
        if let Some(token) = lookup(BOT_TOKEN_VAR) {
            self.bot_token = token.trim().to_string();
        }
        if let Some(debug) = lookup(DEBUG_VAR) {
            self.debug = parse_bool(DEBUG_VAR, &debug)?;
        }
        Ok(())
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Missing("url"));
        }
        if self.cookie.trim().is_empty() {
            return Err(ConfigError::Missing("cookie"));
        }
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::Missing("botToken"));
        }
        if self.room_id.trim().is_empty() {
            return Err(ConfigError::Missing("roomId"));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "pollIntervalSecs must be greater than zero".to_string(),
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "httpTimeoutSecs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title: self.title.clone(),
            link_header: self.link_header,
            show_global_score: self.show_global_score,
        }
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{} must be a boolean, got {:?}",
            var, other
        ))),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Missing required config value: {0}")]
    Missing(&'static str),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

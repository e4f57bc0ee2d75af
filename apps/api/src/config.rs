use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the listen port and numeric knobs are validated; everything has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the persisted slots (api key, generation history).
    pub data_dir: PathBuf,
    pub gemini_api_base: String,
    pub gemini_model: String,
    /// Seeds the api key slot on first start when it is still empty.
    pub gemini_api_key: Option<String>,
    /// Keep only the most recent N artifacts. `None` keeps everything.
    pub history_limit: Option<usize>,
    pub progress_tick_ms: u64,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            history_limit: parse_history_limit(optional_env("HISTORY_LIMIT"))?,
            progress_tick_ms: parse_env("PROGRESS_TICK_MS", 500)?,
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", 120)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            data_dir: PathBuf::from("./data"),
            gemini_api_base: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-pro".to_string(),
            gemini_api_key: None,
            history_limit: None,
            progress_tick_ms: 500,
            http_timeout_secs: 120,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Unset means unbounded; anything but an integer above zero is rejected.
fn parse_history_limit(raw: Option<String>) -> Result<Option<usize>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let limit = raw
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|limit| *limit > 0)
        .with_context(|| format!("HISTORY_LIMIT must be a positive integer, got: {raw}"))?;
    Ok(Some(limit))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

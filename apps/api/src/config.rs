use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which feedback backend `/analyze` uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedbackMode {
    /// Fixed canned feedback, no external calls.
    #[default]
    Stub,
    /// Chat-completion call through `LlmClient`.
    Live,
}

impl FromStr for FeedbackMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(FeedbackMode::Stub),
            "live" => Ok(FeedbackMode::Live),
            other => bail!("FEEDBACK_MODE must be 'stub' or 'live', got '{other}'"),
        }
    }
}

impl fmt::Display for FeedbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackMode::Stub => f.write_str("stub"),
            FeedbackMode::Live => f.write_str("live"),
        }
    }
}

/// Settings for the chat-completion provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Not validated at startup; a missing key fails the first live call.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

/// Application configuration loaded from environment variables.
/// Every variable has a default, so startup only fails on unparseable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub feedback_mode: FeedbackMode,
    pub llm: LlmConfig,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: parse_or(get("PORT"), DEFAULT_PORT)
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            feedback_mode: get("FEEDBACK_MODE")
                .map(|v| v.parse::<FeedbackMode>())
                .transpose()?
                .unwrap_or_default(),
            llm: LlmConfig {
                api_key: get("OPENAI_API_KEY"),
                api_base: get("LLM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout_secs: get("LLM_TIMEOUT_SECS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            },
            max_upload_bytes: parse_or(get("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> Result<T, T::Err> {
    value.map_or(Ok(default), |v| v.trim().parse())
}

#[cfg(test)]
pub(crate) fn test_config(mode: FeedbackMode, api_base: &str, api_key: Option<&str>) -> Config {
    Config {
        port: 0,
        rust_log: "info".to_string(),
        feedback_mode: mode,
        llm: LlmConfig {
            api_key: api_key.map(str::to_string),
            api_base: api_base.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: Some(5),
        },
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
}

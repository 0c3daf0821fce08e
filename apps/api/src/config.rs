use std::time::Duration;

use thiserror::Error;

const DEFAULT_CATALOG_PATH: &str = "college_data.csv";
const DEFAULT_MODEL: &str = "google/flan-t5-large";
const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    Missing(&'static str),

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration loaded from environment variables.
/// Startup fails if the model credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: String,
    pub hf_api_token: String,
    pub hf_model: String,
    pub hf_api_base: String,
    pub guidance_timeout: Duration,
    pub guidance_concurrent: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get("GUIDANCE_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            catalog_path: get("CATALOG_PATH").unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string()),
            hf_api_token: get("HUGGINGFACEHUB_API_TOKEN")
                .ok_or(ConfigError::Missing("HUGGINGFACEHUB_API_TOKEN"))?,
            hf_model: get("HF_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            hf_api_base: get("HF_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            guidance_timeout: Duration::from_secs(timeout_secs),
            guidance_concurrent: match get("GUIDANCE_CONCURRENT") {
                Some(raw) => parse_bool("GUIDANCE_CONCURRENT", &raw)?,
                None => true,
            },
            port: match get("PORT") {
                Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                    key: "PORT",
                    reason: e.to_string(),
                })?,
                None => 8080,
            },
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::Invalid {
            key: "GUIDANCE_TIMEOUT_SECS",
            reason: e.to_string(),
        })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key: "GUIDANCE_TIMEOUT_SECS",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(secs)
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

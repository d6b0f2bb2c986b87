use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::genome::percentile::DEFAULT_JITTER;
use crate::genome::skills::DEFAULT_MAX_SKILLS;

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://torre.ai/api";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,
    pub percentile_jitter: f64,
    pub max_skills: usize,
    /// Optional JSON file replacing the built-in percentile reference table.
    pub percentile_table_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            percentile_jitter: DEFAULT_JITTER,
            max_skills: DEFAULT_MAX_SKILLS,
            percentile_table_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let max_skills = parse_or(&lookup, "MAX_SKILLS", defaults.max_skills)?;
        if max_skills == 0 {
            anyhow::bail!("MAX_SKILLS must be at least 1");
        }
        let percentile_jitter: f64 =
            parse_or(&lookup, "PERCENTILE_JITTER", defaults.percentile_jitter)?;
        if !percentile_jitter.is_finite() || percentile_jitter < 0.0 {
            anyhow::bail!("PERCENTILE_JITTER must be a non-negative number");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            upstream_base_url: lookup("UPSTREAM_BASE_URL").unwrap_or(defaults.upstream_base_url),
            upstream_timeout_secs: parse_or(
                &lookup,
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout_secs,
            )?,
            percentile_jitter,
            max_skills,
            percentile_table_path: lookup("PERCENTILE_TABLE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

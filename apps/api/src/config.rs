use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use crate::planner::PlannerSettings;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding replacement reference tables. Embedded tables otherwise.
    pub data_dir: Option<PathBuf>,
    pub default_timeframe_years: u32,
    pub schedule_seed: Option<u64>,
    pub duration_blend: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: optional_env("CAREER_DATA_DIR").map(PathBuf::from),
            default_timeframe_years: parse_env("DEFAULT_TIMEFRAME_YEARS", 5)?,
            schedule_seed: optional_env("SCHEDULE_SEED")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("SCHEDULE_SEED must be an unsigned integer")?,
            duration_blend: parse_env("DURATION_BLEND", 0.5)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.duration_blend),
            "DURATION_BLEND must be between 0.0 and 1.0, got {}",
            self.duration_blend
        );
        ensure!(
            self.default_timeframe_years > 0,
            "DEFAULT_TIMEFRAME_YEARS must be at least 1"
        );
        Ok(())
    }

    pub fn planner_settings(&self) -> PlannerSettings {
        let defaults = PlannerSettings::default();
        PlannerSettings {
            duration_blend: self.duration_blend,
            default_timeframe_years: self.default_timeframe_years,
            default_seed: self.schedule_seed.unwrap_or(defaults.default_seed),
            ..defaults
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            data_dir: None,
            default_timeframe_years: 5,
            schedule_seed: None,
            duration_blend: 0.5,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
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
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

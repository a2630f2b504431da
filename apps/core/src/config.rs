use std::env;

use crate::error::AppError;

/// Default on-disk database location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/loanmitra.sqlite";

const DEFAULT_PATTERN_THRESHOLD: f32 = 0.4;
const DEFAULT_HISTORY_WINDOW: usize = 10;
const DEFAULT_RATE_LIMIT: usize = 20;
const DEFAULT_RATE_WINDOW_SECS: u64 = 60;
const DEFAULT_CACHE_SIZE: usize = 256;

/// Runtime configuration for the engine, sourced from `LOANMITRA_*`
/// environment variables with sane defaults for local development.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// SQLite database file path.
    pub db_path: String,
    /// Minimum pattern-tier score for a match to be used.
    pub pattern_threshold: f32,
    /// How many recent messages feed the context analyzer.
    pub history_window: usize,
    /// Messages allowed per session per window.
    pub rate_limit: usize,
    /// Rate-limit window length in seconds.
    pub rate_window_secs: u64,
    /// Entries kept in the pattern-tier reply cache.
    pub cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            pattern_threshold: DEFAULT_PATTERN_THRESHOLD,
            history_window: DEFAULT_HISTORY_WINDOW,
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window_secs: DEFAULT_RATE_WINDOW_SECS,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Reads configuration from the environment. Unset variables keep their
    /// defaults; set-but-malformed values are configuration errors rather
    /// than silent fallbacks.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(value) = env::var("LOANMITRA_DB_PATH") {
            config.db_path = value;
        }
        if let Ok(value) = env::var("LOANMITRA_PATTERN_THRESHOLD") {
            config.pattern_threshold = parse_var("LOANMITRA_PATTERN_THRESHOLD", &value)?;
        }
        if let Ok(value) = env::var("LOANMITRA_HISTORY_WINDOW") {
            config.history_window = parse_var("LOANMITRA_HISTORY_WINDOW", &value)?;
        }
        if let Ok(value) = env::var("LOANMITRA_RATE_LIMIT") {
            config.rate_limit = parse_var("LOANMITRA_RATE_LIMIT", &value)?;
        }
        if let Ok(value) = env::var("LOANMITRA_RATE_WINDOW_SECS") {
            config.rate_window_secs = parse_var("LOANMITRA_RATE_WINDOW_SECS", &value)?;
        }
        if let Ok(value) = env::var("LOANMITRA_CACHE_SIZE") {
            config.cache_size = parse_var("LOANMITRA_CACHE_SIZE", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.pattern_threshold) {
            return Err(AppError::Config(format!(
                "pattern threshold must be within 0.0..=1.0, got {}",
                self.pattern_threshold
            )));
        }
        if self.rate_limit == 0 {
            return Err(AppError::Config(
                "rate limit must be at least 1".to_string(),
            ));
        }
        if self.history_window == 0 {
            return Err(AppError::Config(
                "history window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Config(format!("invalid value for {}: {:?}", name, value)))
}

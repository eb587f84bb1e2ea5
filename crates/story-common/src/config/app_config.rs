//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use story_core::MAX_PAGE_SIZE;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub feed: FeedConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

/// Listing configuration: page size cap and the default recency windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
    #[serde(default = "default_top_stories_days")]
    pub top_stories_days: u32,
    #[serde(default = "default_helpful_reviews_days")]
    pub helpful_reviews_days: u32,
    #[serde(default = "default_recent_reviews_days")]
    pub recent_reviews_days: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_page_size: default_max_page_size(),
            top_stories_days: default_top_stories_days(),
            helpful_reviews_days: default_helpful_reviews_days(),
            recent_reviews_days: default_recent_reviews_days(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "story-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_max_page_size() -> i64 {
    MAX_PAGE_SIZE
}

fn default_top_stories_days() -> u32 {
    180
}

fn default_helpful_reviews_days() -> u32 {
    30
}

fn default_recent_reviews_days() -> u32 {
    1
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T, F>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::InvalidValue(key, raw)),
        },
        None => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_page_size = parse_or(&lookup, "FEED_MAX_PAGE_SIZE", default_max_page_size)?;
        if !(1..=MAX_PAGE_SIZE).contains(&max_page_size) {
            return Err(ConfigError::InvalidValue(
                "FEED_MAX_PAGE_SIZE",
                format!("{max_page_size} (must be between 1 and {MAX_PAGE_SIZE})"),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections,
                )?,
                acquire_timeout_secs: parse_or(
                    &lookup,
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    default_acquire_timeout,
                )?,
            },
            feed: FeedConfig {
                max_page_size,
                top_stories_days: parse_or(
                    &lookup,
                    "FEED_TOP_STORIES_DAYS",
                    default_top_stories_days,
                )?,
                helpful_reviews_days: parse_or(
                    &lookup,
                    "FEED_HELPFUL_REVIEWS_DAYS",
                    default_helpful_reviews_days,
                )?,
                recent_reviews_days: parse_or(
                    &lookup,
                    "FEED_RECENT_REVIEWS_DAYS",
                    default_recent_reviews_days,
                )?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

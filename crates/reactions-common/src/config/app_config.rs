//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub summary_cache: SummaryCacheConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Summary cache configuration
///
/// When disabled, every summary call hits the database. Staleness up to
/// `ttl_seconds` is accepted; nothing invalidates entries on write.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryCacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache backend driver name: "redis" or "memory"
    #[serde(default = "default_cache_driver")]
    pub driver: String,
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

impl Default for SummaryCacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            driver: default_cache_driver(),
            ttl_seconds: default_cache_ttl(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for environment variable {0}")]
    InvalidVar(&'static str),
}

// Default value functions
fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_driver() -> String {
    "redis".to_string()
}

fn default_cache_ttl() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: env::var("REDIS_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_redis_max_connections),
            },
            summary_cache: SummaryCacheConfig::from_env(),
        })
    }
}

impl SummaryCacheConfig {
    /// Load only the summary-cache block from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("REACTIONS_SUMMARY_CACHE_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_cache_enabled),
            driver: env::var("REACTIONS_SUMMARY_CACHE_DRIVER")
                .unwrap_or_else(|_| default_cache_driver()),
            ttl_seconds: env::var("REACTIONS_SUMMARY_CACHE_TTL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_cache_ttl),
        }
    }
}

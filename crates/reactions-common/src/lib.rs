//! # reactions-common
//!
//! Shared utilities: configuration loading and telemetry setup.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, RedisConfig, SummaryCacheConfig,
};
pub use telemetry::{init_tracing, init_tracing_with_config, try_init_tracing, TracingConfig};

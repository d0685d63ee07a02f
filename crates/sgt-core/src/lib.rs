//! Shared domain types and configuration for the Steam Game Tracker.
//!
//! The two raw record shapes ([`FollowerObservation`] and [`MentionEvent`])
//! live here so the collectors that produce them and the analysis engine that
//! consumes them agree on a single definition without depending on each other.

mod app_config;
mod config;
mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, RedditCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{FollowerObservation, MentionEvent, Origin};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("configuration validation failed: {0}")]
    Validation(String),
}

use crate::app_config::{AppConfig, Environment, RedditCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any configured value fails to parse or validate.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any configured value fails to parse or validate.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SGT_ENV", "development"));

    let bind_addr = parse_addr("SGT_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("SGT_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("SGT_DATA_DIR", "./data"));

    let default_window_days = parse_u32("SGT_DEFAULT_WINDOW_DAYS", "30")?;
    if default_window_days == 0 {
        return Err(ConfigError::Validation(
            "SGT_DEFAULT_WINDOW_DAYS must be at least 1".to_string(),
        ));
    }

    let steam_base_url = or_default("SGT_STEAM_BASE_URL", "https://steamdb.info");
    let scraper_request_timeout_secs = parse_u64("SGT_SCRAPER_REQUEST_TIMEOUT_SECS", "10")?;
    let scraper_user_agent = or_default("SGT_SCRAPER_USER_AGENT", "sgt/0.1 (popularity-tracker)");
    let scraper_inter_request_delay_ms = parse_u64("SGT_SCRAPER_INTER_REQUEST_DELAY_MS", "2000")?;
    let scraper_max_retries = parse_u32("SGT_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs = parse_u64("SGT_SCRAPER_RETRY_BACKOFF_BASE_SECS", "5")?;

    let reddit_client_id = lookup("REDDIT_CLIENT_ID").ok();
    let reddit_client_secret = lookup("REDDIT_CLIENT_SECRET").ok();
    let reddit_credentials = match (reddit_client_id, reddit_client_secret) {
        (Some(client_id), Some(client_secret)) => Some(RedditCredentials {
            client_id,
            client_secret,
        }),
        (None, None) => None,
        _ => {
            return Err(ConfigError::Validation(
                "REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET must be set together".to_string(),
            ))
        }
    };
    let reddit_user_agent = or_default("REDDIT_USER_AGENT", "sgt/0.1 (popularity-tracker)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        default_window_days,
        steam_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        reddit_credentials,
        reddit_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

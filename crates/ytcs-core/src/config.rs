use crate::app_config::{AppConfig, DEFAULT_MODEL_ID, DEFAULT_YOUTUBE_BASE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?.trim().to_string();
    if youtube_api_key.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "YOUTUBE_API_KEY".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let youtube_base_url = or_default("YTCS_YOUTUBE_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);
    let model_id = or_default("YTCS_MODEL_ID", DEFAULT_MODEL_ID);
    let model_dir = PathBuf::from(or_default("YTCS_MODEL_DIR", "./models"));
    let output_dir = PathBuf::from(or_default("YTCS_OUTPUT_DIR", "."));
    let request_timeout_secs = parse_u64("YTCS_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("YTCS_LOG_LEVEL", "info");

    Ok(AppConfig {
        youtube_api_key,
        youtube_base_url,
        model_id,
        model_dir,
        output_dir,
        request_timeout_secs,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

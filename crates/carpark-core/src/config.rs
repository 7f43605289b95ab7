use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
/// Every setting has a built-in default, so an empty environment yields
/// [`AppConfig::default`].
///
/// # Errors
///
/// Returns `ConfigError` if an override is present but invalid.
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
/// Returns `ConfigError` if an override is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let Some(raw) = lookup(var).ok().filter(|v| !v.trim().is_empty()) else {
            return Ok(default);
        };
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let carpark_ids = match lookup("CARPARK_IDS").ok().filter(|v| !v.trim().is_empty()) {
        Some(raw) => parse_carpark_ids(&raw)?,
        None => defaults.carpark_ids,
    };

    let request_timeout_secs =
        parse_u64("CARPARK_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CARPARK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    let data_dir_default = defaults.data_dir.display().to_string();

    Ok(AppConfig {
        endpoint: or_default("CARPARK_ENDPOINT", &defaults.endpoint),
        carpark_ids,
        category: or_default("CARPARK_CATEGORY", &defaults.category),
        data_dir: PathBuf::from(or_default("CARPARK_DATA_DIR", &data_dir_default)),
        request_timeout_secs,
        user_agent: or_default("CARPARK_USER_AGENT", &defaults.user_agent),
        referer: or_default("CARPARK_REFERER", &defaults.referer),
        log_level: or_default("CARPARK_LOG_LEVEL", &defaults.log_level),
    })
}

/// Split a comma-separated id list, dropping blanks.
fn parse_carpark_ids(raw: &str) -> Result<Vec<String>, ConfigError> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CARPARK_IDS".to_string(),
            reason: "at least one carpark id is required".to_string(),
        });
    }

    Ok(ids)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

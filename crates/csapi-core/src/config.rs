use crate::app_config::{Banner, ClientConfig};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.pcexpress.ca/pcx-bff";

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_client_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_client_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_client_config_from_env() -> Result<ClientConfig, ConfigError> {
    build_client_config(|key| std::env::var(key))
}

/// Build client configuration using the provided env-var lookup function.
///
/// The API key is optional here: a missing key only becomes an error when an
/// operation that needs it runs, so callers can construct a client without
/// credentials (e.g. to exercise argument validation).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unparseable numbers or an
/// unsupported banner.
pub fn build_client_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

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

    let api_key = optional("SUPERSTORE_API_KEY");
    let base_url = or_default("SUPERSTORE_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    let banner = parse_banner(&or_default("SUPERSTORE_BANNER", "superstore"))?;
    let timeout_ms = parse_u64("SUPERSTORE_TIMEOUT_MS", "10000")?;
    let max_retries = parse_u32("SUPERSTORE_MAX_RETRIES", "0")?;
    let retry_backoff_ms = parse_u64("SUPERSTORE_RETRY_BACKOFF_MS", "250")?;
    let log_level = or_default("SUPERSTORE_LOG_LEVEL", "info");

    Ok(ClientConfig {
        api_key,
        base_url,
        banner,
        timeout_ms,
        max_retries,
        retry_backoff_ms,
        log_level,
    })
}

/// Parse a banner name (case-insensitive).
fn parse_banner(s: &str) -> Result<Banner, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "superstore" => Ok(Banner::Superstore),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SUPERSTORE_BANNER".to_string(),
            reason: format!("unsupported banner '{other}', expected 'superstore'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

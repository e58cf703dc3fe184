use crate::app_config::{AppConfig, Environment, SourceCredentials};
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "intellibrief/0.1 (outreach-intelligence)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid. A missing `DATABASE_URL` is
/// reported later by [`AppConfig::require_database_url`].
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
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `KEY=` in a .env file disables a source.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = optional("DATABASE_URL");
    let env = parse_environment(&or_default("INTELLIBRIEF_ENV", "development"))?;
    let bind_addr = parse_addr("INTELLIBRIEF_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("INTELLIBRIEF_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("INTELLIBRIEF_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("INTELLIBRIEF_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("INTELLIBRIEF_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let user_agent = or_default("INTELLIBRIEF_USER_AGENT", DEFAULT_USER_AGENT);
    let simulation_seed = optional("INTELLIBRIEF_SIMULATION_SEED")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("INTELLIBRIEF_SIMULATION_SEED", e.to_string()))
        })
        .transpose()?;

    let credentials = SourceCredentials {
        newsdata_api_key: optional("NEWSDATA_API_KEY"),
        jsearch_api_key: optional("JSEARCH_API_KEY"),
        twinword_api_key: optional("TWINWORD_API_KEY"),
    };

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        user_agent,
        simulation_seed,
        credentials,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INTELLIBRIEF_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::net::SocketAddr;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// API keys for the third-party data providers.
///
/// A missing key switches the matching collector into simulation mode.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SourceCredentials {
    pub newsdata_api_key: Option<String>,
    pub jsearch_api_key: Option<String>,
    pub twinword_api_key: Option<String>,
}

impl std::fmt::Debug for SourceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[redacted]");
        f.debug_struct("SourceCredentials")
            .field("newsdata_api_key", &redact(&self.newsdata_api_key))
            .field("jsearch_api_key", &redact(&self.jsearch_api_key))
            .field("twinword_api_key", &redact(&self.twinword_api_key))
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Unset is allowed so database-less commands can load config.
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub user_agent: String,
    pub simulation_seed: Option<u64>,
    pub credentials: SourceCredentials,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("simulation_seed", &self.simulation_seed)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl AppConfig {
    /// The Postgres URL, for callers that are about to connect.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `DATABASE_URL` is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

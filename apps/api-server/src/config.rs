//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::DatabaseConfig;

/// Which database the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }

    /// Variable holding the database URL for this environment.
    fn database_url_var(self) -> &'static str {
        match self {
            Environment::Development => "DATABASE_URL",
            Environment::Test => "TEST_DATABASE_URL",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = lookup("APP_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);

        let database = lookup(environment.database_url_var()).map(|url| DatabaseConfig {
            url,
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(1),
            timeout: Duration::from_secs(parsed(&lookup, "DB_TIMEOUT_SECS").unwrap_or(10)),
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(8080),
            environment,
            database,
        }
    }
}

/// Read `key` as a `T`. Unset or out-of-range values count as unset.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.parse().ok())
}

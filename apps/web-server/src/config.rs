//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use inkpost_infra::database::DatabaseConfig;

const DEFAULT_SESSION_TTL_SECONDS: u64 = 60 * 60 * 24 * 14;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub session_ttl: Duration,
    /// Optional (email, password) for the bootstrap superuser.
    pub admin: Option<(String, String)>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_parsed("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: env_parsed("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let session_ttl = Duration::from_secs(
            env_parsed("SESSION_TTL_SECONDS").unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
        );

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() => Some((email, password)),
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_parsed("PORT").unwrap_or(8080),
            database,
            session_ttl,
            admin,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

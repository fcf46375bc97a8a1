//! Application configuration loaded from environment variables.

use std::env;

use blogly_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(20),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(2),
            log_sql: flag("DB_LOG_SQL"),
            reset_on_start: flag("DB_RESET_ON_START"),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

/// `true` for `1`, `true`, `yes` or `on`, case-insensitive.
fn flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

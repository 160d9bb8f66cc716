use std::env;
use std::fmt;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOGIN_URL: &str = "/login";
const DEFAULT_MAX_CONNECTIONS: u32 = 8;
/// Cookie signing keys shorter than this are rejected by actix.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, value } => write!(f, "{key} has an invalid value '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub database_url: String,
    pub bind_addr: String,
    /// External sign-in page anonymous requests are sent to.
    pub login_url: String,
    pub session_key: Option<String>,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: v })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "SocietyHub".to_string()),
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            login_url: lookup("LOGIN_URL").unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string()),
            session_key: lookup("SESSION_KEY"),
            db_max_connections,
        })
    }
}

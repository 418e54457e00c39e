// src/config.rs
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    /// Base URL of the REST backend, without trailing slash.
    pub backend_url: String,
    pub db_path: String,
    pub schema_path: String,
    pub http_timeout: Duration,
    /// Extra attempts for idempotent requests on transport failure.
    pub http_retries: u32,
    pub max_workers: usize,
    pub session_ttl_secs: i64,
    pub expiry_redirect_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            backend_url: "http://127.0.0.1:8000/api".to_string(),
            db_path: "outreach.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            http_timeout: Duration::from_secs(30),
            http_retries: 1,
            max_workers: 8,
            session_ttl_secs: 8 * 60 * 60,
            expiry_redirect_secs: 3,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and read `OUTREACH_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("OUTREACH_BIND") {
            cfg.bind = parse("OUTREACH_BIND", v)?;
        }
        if let Some(v) = get("OUTREACH_BACKEND_URL") {
            cfg.backend_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("OUTREACH_DB_PATH") {
            cfg.db_path = v;
        }
        if let Some(v) = get("OUTREACH_SCHEMA_PATH") {
            cfg.schema_path = v;
        }
        if let Some(v) = get("OUTREACH_HTTP_TIMEOUT_SECS") {
            cfg.http_timeout = Duration::from_secs(parse("OUTREACH_HTTP_TIMEOUT_SECS", v)?);
        }
        if let Some(v) = get("OUTREACH_HTTP_RETRIES") {
            cfg.http_retries = parse("OUTREACH_HTTP_RETRIES", v)?;
        }
        if let Some(v) = get("OUTREACH_MAX_WORKERS") {
            cfg.max_workers = parse("OUTREACH_MAX_WORKERS", v)?;
        }
        if let Some(v) = get("OUTREACH_SESSION_TTL_SECS") {
            cfg.session_ttl_secs = parse("OUTREACH_SESSION_TTL_SECS", v)?;
        }
        if let Some(v) = get("OUTREACH_EXPIRY_REDIRECT_SECS") {
            cfg.expiry_redirect_secs = parse("OUTREACH_EXPIRY_REDIRECT_SECS", v)?;
        }

        Ok(cfg)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

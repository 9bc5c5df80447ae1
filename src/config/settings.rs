//! Process settings from environment variables (a `.env` file is honored by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "prodynamic.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEV_SECRET_KEY: &str = "dev-insecure-secret-key-change-me-for-anything-but-local-use";
/// Minimum secret length accepted for deriving the cookie signing key.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Settings {
    pub db_path: PathBuf,
    pub bind: SocketAddr,
    pub secret_key: String,
    /// JSON file replacing the built-in table allow-list.
    pub tables_path: Option<PathBuf>,
    /// Create missing configured tables at startup.
    pub bootstrap: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build settings from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = PathBuf::from(lookup("PRODYNAMIC_DB").unwrap_or_else(|| DEFAULT_DB_PATH.into()));
        let bind_str = lookup("PRODYNAMIC_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind = bind_str
            .parse()
            .map_err(|_| ConfigError::Settings(format!("PRODYNAMIC_BIND: invalid address '{}'", bind_str)))?;
        let secret_key = lookup("PRODYNAMIC_SECRET_KEY").unwrap_or_else(|| DEV_SECRET_KEY.into());
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Settings(format!(
                "PRODYNAMIC_SECRET_KEY must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        let tables_path = lookup("PRODYNAMIC_TABLES").filter(|s| !s.is_empty()).map(PathBuf::from);
        let bootstrap = match lookup("PRODYNAMIC_BOOTSTRAP") {
            None => true,
            Some(v) => parse_flag(&v)
                .ok_or_else(|| ConfigError::Settings(format!("PRODYNAMIC_BOOTSTRAP: invalid flag '{}'", v)))?,
        };
        Ok(Settings {
            db_path,
            bind,
            secret_key,
            tables_path,
            bootstrap,
        })
    }

    /// Settings for a database file with every other value at its default.
    pub fn for_database(db_path: impl Into<PathBuf>) -> Self {
        Settings {
            db_path: db_path.into(),
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            secret_key: DEV_SECRET_KEY.into(),
            tables_path: None,
            bootstrap: true,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

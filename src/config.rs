//! Configuration loader for the `waterwatch` dashboard service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate reads `env::var` for
//! application settings.
//!
//! Missing reading store endpoints are deliberately not errors here: the store
//! gateway turns them into a disconnected handle. Malformed values are errors.
use std::{env, fmt, net::SocketAddr, str::FromStr};

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, treating blank values as unset.
macro_rules! optional_env {
    ($var_name:expr) => {
        env::var($var_name).ok().filter(|v| !v.trim().is_empty())
    };
}

/// Which datastore holds the readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Firebase Realtime Database over its REST interface.
    #[default]
    Firebase,
    /// PostgreSQL table keyed by timestamp.
    Postgres,
    /// Process-local map; contents are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firebase" => Ok(Self::Firebase),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!(
                "Invalid READING_STORE '{}': expected firebase, postgres or memory",
                other
            )),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Firebase => "firebase",
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Selected reading store backend.
    pub store_backend: StoreBackend,

    /// Firebase Realtime Database base URL.
    pub firebase_url: Option<String>,

    /// Optional `auth` query token for Firebase requests.
    pub firebase_auth: Option<String>,

    /// Node (Firebase) or logical collection name holding the readings.
    pub readings_path: String,

    /// PostgreSQL connection string.
    pub db_url: Option<String>,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// Number of readings served to the chart feed.
    pub recent_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            store_backend: StoreBackend::default(),
            firebase_url: None,
            firebase_auth: None,
            readings_path: "water_data".to_string(),
            db_url: None,
            db_pool_max: 5,
            recent_limit: 20,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:5000`)
/// - `READING_STORE` – `firebase`, `postgres` or `memory` (default: `firebase`)
/// - `FIREBASE_DATABASE_URL`, `FIREBASE_AUTH_TOKEN` – Firebase endpoint and token
/// - `READINGS_PATH` – readings node name (default: `water_data`)
/// - `DATABASE_URL` – PostgreSQL connection string
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `RECENT_READINGS_LIMIT` – readings in the chart feed (default: 20)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let bind_addr = match optional_env!("BIND_ADDR") {
        Some(v) => v
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid BIND_ADDR '{}': {}", v, e))?,
        None => defaults.bind_addr,
    };
    let store_backend = match optional_env!("READING_STORE") {
        Some(v) => v.parse::<StoreBackend>()?,
        None => defaults.store_backend,
    };
    let readings_path = optional_env!("READINGS_PATH")
        .map(|p| p.trim_matches('/').to_string())
        .unwrap_or(defaults.readings_path);
    let db_pool_max = parse_env_u32!("DB_POOL_MAX", defaults.db_pool_max);
    let recent_limit = parse_env_u32!("RECENT_READINGS_LIMIT", defaults.recent_limit);

    if recent_limit == 0 {
        return Err(anyhow!("Invalid RECENT_READINGS_LIMIT: must be at least 1"));
    }

    Ok(Config {
        bind_addr,
        store_backend,
        firebase_url: optional_env!("FIREBASE_DATABASE_URL"),
        firebase_auth: optional_env!("FIREBASE_AUTH_TOKEN"),
        readings_path,
        db_url: optional_env!("DATABASE_URL"),
        db_pool_max,
        recent_limit,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the database password and the Firebase token while showing
    /// all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_db_url = self.db_url.as_deref().map(mask_db_url);
        let masked_auth = self.firebase_auth.as_ref().map(|_| "****");

        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR             : {}", self.bind_addr);
        tracing::info!("  READING_STORE         : {}", self.store_backend);
        tracing::info!("  FIREBASE_DATABASE_URL : {:?}", self.firebase_url);
        tracing::info!("  FIREBASE_AUTH_TOKEN   : {:?}", masked_auth);
        tracing::info!("  READINGS_PATH         : {}", self.readings_path);
        tracing::info!("  DATABASE_URL          : {:?}", masked_db_url);
        tracing::info!("  DB_POOL_MAX           : {}", self.db_pool_max);
        tracing::info!("  RECENT_READINGS_LIMIT : {}", self.recent_limit);
    }
}

/// Replace the password portion of a connection URL with `****`.
fn mask_db_url(db_url: &str) -> String {
    // ---
    if let Some(at_pos) = db_url.rfind('@') {
        if let Some(colon_pos) = db_url[..at_pos].rfind(':') {
            // "postgres://host" has its only colon in the scheme
            if !db_url[colon_pos..].starts_with("://") {
                return format!("{}:****{}", &db_url[..colon_pos], &db_url[at_pos..]);
            }
        }
    }
    db_url.to_string()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_backend_names() {
        // ---
        assert_eq!("firebase".parse::<StoreBackend>().unwrap(), StoreBackend::Firebase);
        assert_eq!("Postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_defaults() {
        // ---
        let cfg = Config::default();
        assert_eq!(cfg.recent_limit, 20);
        assert_eq!(cfg.readings_path, "water_data");
        assert_eq!(cfg.bind_addr.port(), 5000);
        assert!(cfg.firebase_url.is_none());
    }

    #[test]
    fn test_password_masking() {
        // ---
        assert_eq!(
            mask_db_url("postgres://water:secret@db:5432/readings"),
            "postgres://water:****@db:5432/readings"
        );
        assert_eq!(
            mask_db_url("postgres://db:5432/readings"),
            "postgres://db:5432/readings"
        );
        assert_eq!(
            mask_db_url("postgres://water@db/readings"),
            "postgres://water@db/readings"
        );
    }
}

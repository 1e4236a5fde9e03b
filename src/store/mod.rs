//! Data access layer for water readings.
//!
//! [`connect`] is called once at startup and hands back a [`ReadingStore`]:
//! either a connected handle over one backend, or a disconnected handle that
//! behaves as a permanently empty, unwritable store. Every public operation
//! absorbs backend failures into an empty / absent / `false` result after
//! logging them once, so the HTTP layer never sees a [`StoreError`]. Nothing
//! here retries, caches or locks on the caller's behalf.

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::{Config, StoreBackend};
use crate::models::timestamp_key;
use crate::{Reading, StoredReading};

mod firebase;
mod memory;
mod postgres;

pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

// ---

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid store endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("undecodable store payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Concrete backend behind a connected handle.
#[derive(Clone)]
pub enum Backend {
    Firebase(FirebaseStore),
    Postgres(PostgresStore),
    Memory(MemoryStore),
}

impl Backend {
    fn name(&self) -> &'static str {
        match self {
            Backend::Firebase(_) => "firebase",
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    async fn insert(&self, key: &str, value: &StoredReading) -> StoreResult<()> {
        match self {
            Backend::Firebase(store) => store.insert(key, value).await,
            Backend::Postgres(store) => store.insert(key, value).await,
            Backend::Memory(store) => {
                store.insert(key, *value);
                Ok(())
            }
        }
    }

    /// Up to `limit` readings with the greatest keys, in no particular order.
    async fn last_n(&self, limit: u32) -> StoreResult<Vec<Reading>> {
        match self {
            Backend::Firebase(store) => store.last_n(limit).await,
            Backend::Postgres(store) => store.last_n(limit).await,
            Backend::Memory(store) => Ok(store.last_n(limit)),
        }
    }
}

/// Handle to the reading store, decided once at startup.
#[derive(Clone)]
pub enum ReadingStore {
    Connected(Backend),
    Disconnected,
}

impl ReadingStore {
    pub fn is_connected(&self) -> bool {
        matches!(self, ReadingStore::Connected(_))
    }

    /// The most recent `limit` readings, ascending by timestamp.
    ///
    /// Empty when disconnected or when the backend fails.
    pub async fn fetch_recent(&self, limit: u32) -> Vec<Reading> {
        // ---
        let ReadingStore::Connected(backend) = self else {
            return Vec::new();
        };

        match backend.last_n(limit).await {
            Ok(mut readings) => {
                readings.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
                debug!("Fetched {} readings from {}", readings.len(), backend.name());
                readings
            }
            Err(e) => {
                error!("Error fetching readings from {}: {}", backend.name(), e);
                Vec::new()
            }
        }
    }

    /// The reading with the greatest timestamp, or `None` when there is none
    /// or the backend fails.
    pub async fn fetch_latest(&self) -> Option<Reading> {
        // ---
        let ReadingStore::Connected(backend) = self else {
            return None;
        };

        match backend.last_n(1).await {
            Ok(readings) => readings
                .into_iter()
                .max_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            Err(e) => {
                error!("Error fetching latest reading from {}: {}", backend.name(), e);
                None
            }
        }
    }

    /// Store a reading keyed by the current local time.
    pub async fn write(&self, tds: f64, temperature: f64) -> bool {
        self.write_at(Local::now().naive_local(), tds, temperature)
            .await
    }

    /// Store a reading keyed by `at`. A reading already stored under the same
    /// second is replaced.
    pub async fn write_at(&self, at: NaiveDateTime, tds: f64, temperature: f64) -> bool {
        // ---
        let ReadingStore::Connected(backend) = self else {
            warn!("Reading store is disconnected, dropping reading");
            return false;
        };

        let key = timestamp_key(at);
        let value = StoredReading { tds, temperature };

        match backend.insert(&key, &value).await {
            Ok(()) => {
                info!(
                    "Stored reading {} in {}: TDS={}, Temp={}",
                    key,
                    backend.name(),
                    tds,
                    temperature
                );
                true
            }
            Err(e) => {
                error!("Error storing reading {} in {}: {}", key, backend.name(), e);
                false
            }
        }
    }
}

/// Build the reading store selected by `cfg`.
///
/// Never fails: missing endpoints or a failed connection produce
/// [`ReadingStore::Disconnected`] so the service still starts and reports
/// "no data".
pub async fn connect(cfg: &Config) -> ReadingStore {
    // ---
    let backend = match cfg.store_backend {
        StoreBackend::Memory => Ok(Backend::Memory(MemoryStore::new())),
        StoreBackend::Firebase => match cfg.firebase_url.as_deref() {
            Some(url) => FirebaseStore::new(url, cfg.firebase_auth.clone(), &cfg.readings_path)
                .map(Backend::Firebase),
            None => {
                warn!("FIREBASE_DATABASE_URL is not set, running without a reading store");
                return ReadingStore::Disconnected;
            }
        },
        StoreBackend::Postgres => match cfg.db_url.as_deref() {
            Some(url) => PostgresStore::connect(url, cfg.db_pool_max, &cfg.readings_path)
                .await
                .map(Backend::Postgres),
            None => {
                warn!("DATABASE_URL is not set, running without a reading store");
                return ReadingStore::Disconnected;
            }
        },
    };

    match backend {
        Ok(backend) => {
            info!("Reading store initialized ({})", backend.name());
            ReadingStore::Connected(backend)
        }
        Err(e) => {
            warn!("Reading store initialization failed: {}", e);
            ReadingStore::Disconnected
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::NaiveDate;
    use tokio_test::block_on;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap()
    }

    fn memory_store() -> ReadingStore {
        ReadingStore::Connected(Backend::Memory(MemoryStore::new()))
    }

    #[test]
    fn test_disconnected_is_empty_and_unwritable() {
        // ---
        let store = ReadingStore::Disconnected;
        assert!(!store.is_connected());
        assert!(block_on(store.fetch_recent(20)).is_empty());
        assert!(block_on(store.fetch_latest()).is_none());
        assert!(!block_on(store.write(1.0, 1.0)));
        assert!(!block_on(store.write_at(at(0), 1.0, 1.0)));
    }

    #[test]
    fn test_recent_is_ascending_and_limited() {
        // ---
        let store = memory_store();
        for minute in [7, 3, 9, 1, 5] {
            assert!(block_on(store.write_at(at(minute), minute as f64 * 10.0, 20.0)));
        }

        let recent = block_on(store.fetch_recent(3));
        let keys: Vec<_> = recent.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "2025-06-01T10:05:00",
                "2025-06-01T10:07:00",
                "2025-06-01T10:09:00"
            ]
        );
    }

    #[test]
    fn test_latest_reading() {
        // ---
        let store = memory_store();
        assert!(block_on(store.fetch_latest()).is_none());

        block_on(store.write_at(at(2), 120.0, 18.0));
        block_on(store.write_at(at(4), 640.0, 41.0));
        block_on(store.write_at(at(3), 90.0, 12.0));

        let latest = block_on(store.fetch_latest()).unwrap();
        assert_eq!(latest.timestamp, "2025-06-01T10:04:00");
        assert_eq!(latest.tds, 640.0);
        assert_eq!(latest.temperature, 41.0);
    }

    #[test]
    fn test_same_second_overwrites() {
        // ---
        let store = memory_store();
        block_on(store.write_at(at(1), 100.0, 20.0));
        block_on(store.write_at(at(1), 300.0, 25.0));

        let recent = block_on(store.fetch_recent(20));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].tds, 300.0);
    }

    #[test]
    fn test_zero_values_are_still_a_reading() {
        // ---
        let store = memory_store();
        block_on(store.write_at(at(1), 0.0, 0.0));
        let latest = block_on(store.fetch_latest());
        assert!(latest.is_some(), "a stored zero reading is not an absent reading");
    }

    #[test]
    fn test_connect_without_endpoint_is_disconnected() {
        // ---
        let cfg = Config::default();
        assert!(!block_on(connect(&cfg)).is_connected());

        let cfg = Config {
            store_backend: StoreBackend::Postgres,
            ..Config::default()
        };
        assert!(!block_on(connect(&cfg)).is_connected());

        let cfg = Config {
            store_backend: StoreBackend::Firebase,
            firebase_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(!block_on(connect(&cfg)).is_connected());
    }

    #[test]
    fn test_connect_memory() {
        // ---
        let cfg = Config {
            store_backend: StoreBackend::Memory,
            ..Config::default()
        };
        assert!(block_on(connect(&cfg)).is_connected());
    }
}

//! PostgreSQL backend for readings.
//!
//! Readings are rows keyed by `(collection, reading_key)`, where `collection`
//! is the configured readings path. The schema is created on connect and is
//! safe to apply on every startup.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::StoreResult;
use crate::{Reading, StoredReading};

// ---

#[derive(Clone)]
pub struct PostgresStore {
    // ---
    pool: PgPool,
    collection: String,
}

impl PostgresStore {
    /// Connect, then make sure the schema exists.
    pub async fn connect(db_url: &str, pool_max: u32, collection: &str) -> StoreResult<Self> {
        // ---
        let pool = PgPoolOptions::new()
            .max_connections(pool_max)
            .connect(db_url)
            .await?;

        info!("Connected to database, applying schema");
        create_schema(&pool).await?;

        Ok(Self {
            pool,
            collection: collection.to_string(),
        })
    }

    pub async fn insert(&self, key: &str, value: &StoredReading) -> StoreResult<()> {
        // ---
        sqlx::query(
            r#"
            INSERT INTO water_readings (collection, reading_key, tds, temperature)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, reading_key) DO UPDATE SET
                tds = EXCLUDED.tds,
                temperature = EXCLUDED.temperature
            "#,
        )
        .bind(&self.collection)
        .bind(key)
        .bind(value.tds)
        .bind(value.temperature)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn last_n(&self, limit: u32) -> StoreResult<Vec<Reading>> {
        // ---
        let readings = sqlx::query_as::<_, Reading>(
            r#"
            SELECT reading_key AS timestamp, tds, temperature
            FROM water_readings
            WHERE collection = $1
            ORDER BY reading_key DESC
            LIMIT $2
            "#,
        )
        .bind(&self.collection)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }
}

/// Create the readings table, keyed by `(collection, reading_key)` (idempotent).
async fn create_schema(pool: &PgPool) -> StoreResult<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS water_readings (
            collection   TEXT             NOT NULL,
            reading_key  TEXT             NOT NULL,
            tds          DOUBLE PRECISION NOT NULL,
            temperature  DOUBLE PRECISION NOT NULL,
            PRIMARY KEY (collection, reading_key)
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

//! Firebase Realtime Database backend, spoken to over its REST interface.
//!
//! Readings live under `/{readings_path}/{timestamp_key}` as
//! `{"tds": .., "temperature": ..}`. Keys sort chronologically, so "latest N"
//! is an `orderBy="$key"` query with `limitToLast`.

use std::collections::BTreeMap;

use reqwest::{Client, Url};
use tracing::debug;

use super::{StoreError, StoreResult};
use crate::{Reading, StoredReading};

// ---

#[derive(Clone)]
pub struct FirebaseStore {
    // ---
    client: Client,
    base_url: Url,
    auth: Option<String>,
    readings_path: String,
}

impl FirebaseStore {
    /// Validate the endpoint and build a client. Performs no network I/O.
    pub fn new(endpoint: &str, auth: Option<String>, readings_path: &str) -> StoreResult<Self> {
        // ---
        let invalid = |reason: String| StoreError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason,
        };

        let mut base_url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base_url.scheme())));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            auth,
            readings_path: readings_path.trim_matches('/').to_string(),
        })
    }

    /// URL of `{path}.json` below the database root, with the auth token attached.
    fn url(&self, path: &str) -> StoreResult<Url> {
        // ---
        let mut url = self
            .base_url
            .join(&format!("{path}.json"))
            .map_err(|e| StoreError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        if let Some(auth) = &self.auth {
            url.query_pairs_mut().append_pair("auth", auth);
        }
        Ok(url)
    }

    pub async fn insert(&self, key: &str, value: &StoredReading) -> StoreResult<()> {
        // ---
        let url = self.url(&format!("{}/{}", self.readings_path, key))?;
        debug!("PUT {}/{}", self.readings_path, key);

        let response = self.client.put(url).json(value).send().await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn last_n(&self, limit: u32) -> StoreResult<Vec<Reading>> {
        // ---
        let mut url = self.url(&self.readings_path)?;
        url.query_pairs_mut()
            .append_pair("orderBy", "\"$key\"")
            .append_pair("limitToLast", &limit.to_string());
        debug!("GET {} (limitToLast={})", self.readings_path, limit);

        let response = check_status(self.client.get(url).send().await?).await?;
        let body = response.text().await?;
        decode_readings(&body)
    }
}

async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
    // ---
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Decode a `{key: {tds, temperature}}` object; `null` means no readings.
fn decode_readings(body: &str) -> StoreResult<Vec<Reading>> {
    // ---
    let entries: Option<BTreeMap<String, StoredReading>> = serde_json::from_str(body)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| Reading::from_stored(key, value))
        .collect())
}

use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, error};

use super::{ApiError, AppState};
use crate::ChartPoint;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/data", get(handler))
}

/// Handle `GET /data`: recent readings, oldest first, labelled `HH:MM`.
async fn handler(
    State((store, config)): State<AppState>,
) -> Result<Json<Vec<ChartPoint>>, ApiError> {
    // ---
    let readings = store.fetch_recent(config.recent_limit).await;
    debug!("GET /data - formatting {} readings", readings.len());

    let points = readings
        .iter()
        .map(|reading| {
            ChartPoint::from_reading(reading).map_err(|e| {
                error!("Stored key '{}' is not a timestamp: {}", reading.timestamp, e);
                ApiError::Internal(format!(
                    "stored reading key '{}' does not match the timestamp format: {}",
                    reading.timestamp, e
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(points))
}

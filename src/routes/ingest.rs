//! Inbound reading endpoints.
//!
//! `/add_real_data` is used by the dashboard's manual entry form and
//! `/sensor_data` by devices in the field. Both validate the body, write one
//! reading keyed by the current time and acknowledge with the store's result.
//! A store that is down is not a client error: the response is still 200 with
//! `success: false`.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{ApiError, AppState};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/add_real_data", post(add_real_data))
        .route("/sensor_data", post(sensor_data))
}

/// Validated `{tds, temperature}` request body.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SensorPayload {
    tds: f64,
    temperature: f64,
}

impl SensorPayload {
    fn from_body(body: Result<Json<Value>, JsonRejection>) -> Result<Self, ApiError> {
        // ---
        let Json(body) = body?;
        let fields = body
            .as_object()
            .ok_or_else(|| ApiError::BadRequest("request body must be a JSON object".into()))?;

        let tds = numeric_field(fields, "tds")?;
        let temperature = numeric_field(fields, "temperature")?;
        if tds < 0.0 {
            return Err(ApiError::BadRequest(format!(
                "field 'tds' must not be negative, got {tds}"
            )));
        }

        Ok(Self { tds, temperature })
    }
}

/// A finite number, given either as a JSON number or a numeric string.
fn numeric_field(fields: &serde_json::Map<String, Value>, name: &str) -> Result<f64, ApiError> {
    // ---
    let value = fields
        .get(name)
        .ok_or_else(|| ApiError::BadRequest(format!("missing field '{name}'")))?;

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| ApiError::BadRequest(format!("field '{name}' must be a number, got {value}")))
}

#[derive(Debug, Serialize)]
struct WriteAck {
    success: bool,
    message: &'static str,
}

async fn add_real_data(
    State((store, _config)): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WriteAck>, ApiError> {
    // ---
    let payload = SensorPayload::from_body(body)?;
    info!(
        "POST /add_real_data - TDS={}, Temp={}",
        payload.tds, payload.temperature
    );

    let success = store.write(payload.tds, payload.temperature).await;
    if !success {
        warn!("POST /add_real_data - reading was not stored");
    }

    Ok(Json(WriteAck {
        success,
        message: if success {
            "Real data added successfully"
        } else {
            "Failed to add real data"
        },
    }))
}

async fn sensor_data(
    State((store, _config)): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WriteAck>, ApiError> {
    // ---
    let payload = SensorPayload::from_body(body)?;
    info!(
        "POST /sensor_data - TDS={}, Temp={}",
        payload.tds, payload.temperature
    );

    let success = store.write(payload.tds, payload.temperature).await;
    if !success {
        warn!("POST /sensor_data - reading was not stored");
    }

    Ok(Json(WriteAck {
        success,
        message: if success {
            "Sensor data stored successfully"
        } else {
            "Failed to store sensor data"
        },
    }))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<SensorPayload, ApiError> {
        SensorPayload::from_body(Ok(Json(body)))
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        // ---
        let payload = parse(json!({"tds": 600, "temperature": 40.5})).unwrap();
        assert_eq!(payload, SensorPayload { tds: 600.0, temperature: 40.5 });

        let payload = parse(json!({"tds": " 12.5", "temperature": "-3"})).unwrap();
        assert_eq!(payload, SensorPayload { tds: 12.5, temperature: -3.0 });
    }

    #[test]
    fn test_rejects_missing_fields() {
        // ---
        let err = parse(json!({"tds": 600})).unwrap_err();
        assert_eq!(err.to_string(), "missing field 'temperature'");
        assert!(parse(json!({})).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        // ---
        assert!(parse(json!({"tds": "abc", "temperature": 20})).is_err());
        assert!(parse(json!({"tds": null, "temperature": 20})).is_err());
        assert!(parse(json!({"tds": [1], "temperature": 20})).is_err());
        assert!(parse(json!({"tds": "NaN", "temperature": 20})).is_err());
        assert!(parse(json!({"tds": 100, "temperature": "inf"})).is_err());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        // ---
        assert!(parse(json!([600, 40])).is_err());
        assert!(parse(json!("600")).is_err());
        assert!(parse(json!({"tds": -1, "temperature": 20})).is_err());
    }
}

//! Data models for water quality readings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

// ---

/// Storage key format for readings: sortable, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Chart label format derived from a storage key.
pub const DISPLAY_FORMAT: &str = "%H:%M";

/// A scalar that may or may not have been measured.
///
/// Converting from a bare `f64` treats exactly `0.0` as [`Measurement::Absent`]:
/// sensors report zero when nothing is connected, so a stored zero cannot be
/// told apart from missing data. Build [`Measurement::Present`] directly to
/// classify a genuine zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    Present(f64),
    Absent,
}

impl Measurement {
    pub fn value(self) -> Option<f64> {
        match self {
            Measurement::Present(v) => Some(v),
            Measurement::Absent => None,
        }
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        if value == 0.0 {
            Measurement::Absent
        } else {
            Measurement::Present(value)
        }
    }
}

impl From<Option<f64>> for Measurement {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Measurement::Absent, Measurement::from)
    }
}

/// Value stored under a timestamp key in the reading store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    // ---
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tds: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature: f64,
}

/// A reading together with its storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    // ---
    pub timestamp: String,
    pub tds: f64,
    pub temperature: f64,
}

impl Reading {
    pub fn from_stored(timestamp: impl Into<String>, stored: StoredReading) -> Self {
        Self {
            timestamp: timestamp.into(),
            tds: stored.tds,
            temperature: stored.temperature,
        }
    }
}

/// Chart feed entry served by `/data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    // ---
    pub timestamp: String,
    pub tds: f64,
    pub temperature: f64,
}

impl ChartPoint {
    /// Convert a stored reading into a chart point labelled `HH:MM`.
    pub fn from_reading(reading: &Reading) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            timestamp: display_time(&reading.timestamp)?,
            tds: reading.tds,
            temperature: reading.temperature,
        })
    }
}

/// Storage key for the given wall-clock time.
pub fn timestamp_key(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Reformat a storage key as `HH:MM`, parsing it with the key format.
pub fn display_time(key: &str) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDateTime::parse_from_str(key, TIMESTAMP_FORMAT)?;
    Ok(parsed.format(DISPLAY_FORMAT).to_string())
}

/// Accept JSON numbers or numeric strings; anything else decodes as zero.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 26)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_key_format() {
        // ---
        assert_eq!(timestamp_key(at(18, 45, 7)), "2025-03-26T18:45:07");
    }

    #[test]
    fn test_keys_sort_chronologically() {
        // ---
        let mut keys = vec![
            timestamp_key(at(9, 5, 0)),
            timestamp_key(at(18, 45, 0)),
            timestamp_key(at(9, 4, 59)),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "2025-03-26T09:04:59",
                "2025-03-26T09:05:00",
                "2025-03-26T18:45:00"
            ]
        );
    }

    #[test]
    fn test_display_time() {
        // ---
        assert_eq!(display_time("2025-03-26T18:45:07").unwrap(), "18:45");
        assert_eq!(display_time(&timestamp_key(at(7, 3, 0))).unwrap(), "07:03");
        assert!(display_time("2025-03-26 18:45:07").is_err());
        assert!(display_time("-NxYz123").is_err());
    }

    #[test]
    fn test_zero_means_absent() {
        // ---
        assert_eq!(Measurement::from(0.0), Measurement::Absent);
        assert_eq!(Measurement::from(None::<f64>), Measurement::Absent);
        assert_eq!(Measurement::from(12.5), Measurement::Present(12.5));
        assert_eq!(Measurement::from(Some(-3.0)), Measurement::Present(-3.0));
        assert_eq!(Measurement::Present(0.0).value(), Some(0.0));
    }

    #[test]
    fn test_lenient_stored_reading() {
        // ---
        let r: StoredReading =
            serde_json::from_str(r#"{"tds": "412.5", "temperature": 21}"#).unwrap();
        assert_eq!(r.tds, 412.5);
        assert_eq!(r.temperature, 21.0);

        let r: StoredReading = serde_json::from_str(r#"{"tds": null}"#).unwrap();
        assert_eq!(r.tds, 0.0);
        assert_eq!(r.temperature, 0.0);

        let r: StoredReading = serde_json::from_str(r#"{"tds": "n/a", "temperature": 4}"#).unwrap();
        assert_eq!(r.tds, 0.0);
        assert_eq!(r.temperature, 4.0);
    }

    #[test]
    fn test_chart_point() {
        // ---
        let reading = Reading {
            timestamp: "2025-03-26T06:30:59".to_string(),
            tds: 120.0,
            temperature: 18.5,
        };
        let point = ChartPoint::from_reading(&reading).unwrap();
        assert_eq!(point.timestamp, "06:30");
        assert_eq!(point.tds, 120.0);
        assert_eq!(point.temperature, 18.5);
    }
}

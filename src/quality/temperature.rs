//! Temperature bands and drinking advisories.

use serde::Serialize;

use crate::Measurement;

/// Water temperature band (°C), in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    NoData,
    /// below 5
    VeryCold,
    /// [5, 15)
    Cool,
    /// [15, 25)
    Room,
    /// [25, 35)
    SlightlyWarm,
    /// [35, 50)
    Warm,
    /// 50 and above
    Hot,
}

impl TemperatureBand {
    pub fn for_temperature(temperature: Measurement) -> Self {
        match temperature.value() {
            None => TemperatureBand::NoData,
            Some(t) if t < 5.0 => TemperatureBand::VeryCold,
            Some(t) if t < 15.0 => TemperatureBand::Cool,
            Some(t) if t < 25.0 => TemperatureBand::Room,
            Some(t) if t < 35.0 => TemperatureBand::SlightlyWarm,
            Some(t) if t < 50.0 => TemperatureBand::Warm,
            Some(_) => TemperatureBand::Hot,
        }
    }

    pub fn advisories(self) -> &'static [&'static str] {
        match self {
            TemperatureBand::NoData => &[
                "No temperature data available",
                "Connect temperature sensor for complete analysis",
            ],
            TemperatureBand::VeryCold => &[
                "Water is very cold - may affect digestion",
                "Consider warming to room temperature before drinking",
                "Cold water may constrict blood vessels temporarily",
                "Ideal for refrigeration and cold storage",
            ],
            TemperatureBand::Cool => &[
                "Cool water - refreshing for drinking",
                "Ideal temperature for water storage",
                "Good for metabolic functions and hydration",
                "Suitable temperature for athletic activities",
            ],
            TemperatureBand::Room => &[
                "Room temperature - ideal for drinking",
                "Best for hydration and digestion",
                "Optimal for nutrient absorption",
                "Most comfortable for daily consumption",
            ],
            TemperatureBand::SlightlyWarm => &[
                "Slightly warm - pleasant for drinking in cold weather",
                "Monitor water source for bacterial growth",
                "Not ideal for long-term storage",
                "Good for digestion and metabolism",
            ],
            TemperatureBand::Warm => &[
                "Warm water - potential contamination risk",
                "Check water source and storage conditions",
                "Immediate consumption recommended",
                "May promote bacterial growth if stored",
            ],
            TemperatureBand::Hot => &[
                "CRITICAL: Hot water - high contamination risk",
                "Immediate testing and investigation required",
                "Check for equipment malfunction",
                "Avoid consumption until verified safe",
            ],
        }
    }
}

/// Ordered advisories for a water temperature in °C.
pub fn temperature_advisories(temperature: impl Into<Measurement>) -> &'static [&'static str] {
    TemperatureBand::for_temperature(temperature.into()).advisories()
}

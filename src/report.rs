//! Classification bundle for the latest reading.

use rand::Rng;
use serde::Serialize;

use crate::quality::{
    classify_tds, improvement_suggestions, secondary_parameters, temperature_advisories,
    water_quality_standards, QualityDetail, SecondaryParameters, WaterStandard,
};
use crate::{Measurement, Reading};

/// Everything the dashboard page shows about one reading.
#[derive(Debug, Clone, Serialize)]
pub struct WaterReport {
    // ---
    /// Storage key of the reading, if there is one.
    pub timestamp: Option<String>,
    pub tds: f64,
    pub temperature: f64,
    pub quality: QualityDetail,
    pub temperature_advisories: &'static [&'static str],
    pub improvement_suggestions: Vec<&'static str>,
    /// Simulated, see [`crate::quality::secondary_parameters`].
    pub parameters: SecondaryParameters,
    pub standards: &'static [WaterStandard],
    pub has_data: bool,
    pub store_connected: bool,
}

impl WaterReport {
    /// Build the report; `None` renders the "no data" variant of every section.
    pub fn build<R: Rng>(latest: Option<&Reading>, store_connected: bool, rng: &mut R) -> Self {
        // ---
        let (tds, temperature) = latest.map_or((0.0, 0.0), |r| (r.tds, r.temperature));
        let tds_m = Measurement::from(tds);
        let temperature_m = Measurement::from(temperature);

        Self {
            timestamp: latest.map(|r| r.timestamp.clone()),
            tds,
            temperature,
            quality: classify_tds(tds_m),
            temperature_advisories: temperature_advisories(temperature_m),
            improvement_suggestions: improvement_suggestions(tds_m, temperature_m),
            parameters: secondary_parameters(tds_m, temperature_m, rng),
            standards: water_quality_standards(),
            has_data: latest.is_some(),
            store_connected,
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::quality::{QualityTier, TemperatureBand};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_report_without_reading() {
        // ---
        let mut rng = StdRng::seed_from_u64(7);
        let report = WaterReport::build(None, false, &mut rng);
        assert!(!report.has_data);
        assert_eq!(report.quality.level, QualityTier::NoData);
        assert_eq!(report.parameters, SecondaryParameters::NoData);
        assert_eq!(
            report.temperature_advisories,
            TemperatureBand::NoData.advisories()
        );
        assert_eq!(report.standards.len(), 3);
    }

    #[test]
    fn test_report_for_contaminated_warm_water() {
        // ---
        let reading = Reading {
            timestamp: "2025-06-01T10:00:00".to_string(),
            tds: 600.0,
            temperature: 40.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let report = WaterReport::build(Some(&reading), true, &mut rng);

        assert!(report.has_data);
        assert_eq!(report.timestamp.as_deref(), Some("2025-06-01T10:00:00"));
        assert_eq!(report.quality.level, QualityTier::Unacceptable);
        assert_eq!(report.temperature_advisories, TemperatureBand::Warm.advisories());
        assert!(report.parameters.estimates().is_some());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["quality"]["level"], "Unacceptable");
        assert_eq!(json["store_connected"], true);
    }

    #[test]
    fn test_stored_zero_reading_reports_no_data() {
        // ---
        let reading = Reading {
            timestamp: "2025-06-01T10:00:00".to_string(),
            tds: 0.0,
            temperature: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let report = WaterReport::build(Some(&reading), true, &mut rng);
        assert!(report.has_data);
        assert_eq!(report.quality.level, QualityTier::NoData);
    }
}

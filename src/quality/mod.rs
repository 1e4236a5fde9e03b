//! Classification engine: pure mappings from readings to advice.
//!
//! Every function here accepts [`crate::Measurement`] (or anything convertible
//! into one) and handles the no-data case explicitly instead of failing.

mod parameters;
mod standards;
mod suggestions;
mod tds;
mod temperature;

pub use parameters::{secondary_parameters, ParameterEstimates, SecondaryParameters, NO_DATA_MARKER};
pub use standards::{water_quality_standards, ParameterLimit, WaterStandard};
pub use suggestions::improvement_suggestions;
pub use tds::{classify_tds, QualityDetail, QualityTier, RiskLevel};
pub use temperature::{temperature_advisories, TemperatureBand};

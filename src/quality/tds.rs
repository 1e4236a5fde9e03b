//! TDS tiers and their descriptive records.

use std::fmt;

use serde::Serialize;

use crate::Measurement;

/// Water quality tier by total dissolved solids, in ascending TDS order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualityTier {
    #[serde(rename = "No Data")]
    NoData,
    #[serde(rename = "Ultra Pure")]
    UltraPure,
    Excellent,
    Good,
    Fair,
    Poor,
    Unacceptable,
    Hazardous,
}

/// Health risk attached to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    Unknown,
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Critical,
}

/// Descriptive record for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityDetail {
    pub level: QualityTier,
    /// Stable tag for styling, e.g. `"ultra-pure"`.
    pub class: &'static str,
    pub description: &'static str,
    pub drinking_safety: &'static str,
    pub health_impact: &'static str,
    pub usage: &'static str,
    pub risk_level: RiskLevel,
}

impl QualityTier {
    /// Lower bounds (ppm, inclusive) of each measured tier.
    const LOWER_BOUNDS: [(f64, QualityTier); 6] = [
        (900.0, QualityTier::Hazardous),
        (500.0, QualityTier::Unacceptable),
        (350.0, QualityTier::Poor),
        (250.0, QualityTier::Fair),
        (150.0, QualityTier::Good),
        (50.0, QualityTier::Excellent),
    ];

    pub fn for_tds(tds: Measurement) -> Self {
        let Some(ppm) = tds.value() else {
            return QualityTier::NoData;
        };
        Self::LOWER_BOUNDS
            .iter()
            .find(|(lower, _)| ppm >= *lower)
            .map_or(QualityTier::UltraPure, |(_, tier)| *tier)
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::NoData => "No Data",
            QualityTier::UltraPure => "Ultra Pure",
            QualityTier::Excellent => "Excellent",
            QualityTier::Good => "Good",
            QualityTier::Fair => "Fair",
            QualityTier::Poor => "Poor",
            QualityTier::Unacceptable => "Unacceptable",
            QualityTier::Hazardous => "Hazardous",
        }
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            QualityTier::NoData => RiskLevel::Unknown,
            QualityTier::UltraPure => RiskLevel::Low,
            QualityTier::Excellent => RiskLevel::VeryLow,
            QualityTier::Good => RiskLevel::Low,
            QualityTier::Fair => RiskLevel::Moderate,
            QualityTier::Poor => RiskLevel::High,
            QualityTier::Unacceptable => RiskLevel::VeryHigh,
            QualityTier::Hazardous => RiskLevel::Critical,
        }
    }

    pub fn detail(self) -> QualityDetail {
        let (class, description, drinking_safety, health_impact, usage) = match self {
            QualityTier::NoData => (
                "no-data",
                "No sensor data available",
                "Cannot assess without data",
                "Unknown - connect sensors",
                "Not determinable",
            ),
            QualityTier::UltraPure => (
                "ultra-pure",
                "Extremely pure demineralized water",
                "Not ideal for regular drinking - lacks essential minerals",
                "May leach minerals from the body with long-term consumption",
                "Laboratory use, specific medical applications, batteries",
            ),
            QualityTier::Excellent => (
                "excellent",
                "Ideal mineralized drinking water",
                "Perfect for drinking and cooking",
                "Contains beneficial minerals like calcium and magnesium",
                "Drinking, cooking, baby formula, brewing coffee and tea",
            ),
            QualityTier::Good => (
                "good",
                "Good quality potable water",
                "Safe for drinking and domestic use",
                "Adequate mineral content for daily consumption",
                "General drinking, cooking, bathing, gardening",
            ),
            QualityTier::Fair => (
                "fair",
                "Acceptable quality with some impurities",
                "Generally safe with filtration recommended",
                "May contain elevated levels of certain minerals",
                "Domestic use with filtration, gardening, cleaning",
            ),
            QualityTier::Poor => (
                "poor",
                "Low quality water with significant impurities",
                "Not recommended without treatment",
                "May cause digestive issues with prolonged consumption",
                "Limited domestic use, toilet flushing, irrigation",
            ),
            QualityTier::Unacceptable => (
                "unacceptable",
                "Highly contaminated water",
                "Not safe for drinking - treatment required",
                "Risk of gastrointestinal disease and other health issues",
                "Industrial use only, construction, firefighting",
            ),
            QualityTier::Hazardous => (
                "hazardous",
                "Severely contaminated - immediate action required",
                "Dangerous to health - avoid all contact",
                "Serious health risks including poisoning and disease",
                "Not recommended for any use without treatment",
            ),
        };

        QualityDetail {
            level: self,
            class,
            description,
            drinking_safety,
            health_impact,
            usage,
            risk_level: self.risk_level(),
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RiskLevel {
    pub fn name(self) -> &'static str {
        match self {
            RiskLevel::Unknown => "Unknown",
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a TDS reading (ppm) into its tier record.
///
/// Tiers are inclusive of their lower bound and exclusive of their upper one.
/// A bare `0.0` converts to [`Measurement::Absent`] and yields `No Data`.
pub fn classify_tds(tds: impl Into<Measurement>) -> QualityDetail {
    QualityTier::for_tds(tds.into()).detail()
}

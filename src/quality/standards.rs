//! Reference limits published by drinking water standards bodies.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterLimit {
    pub parameter: &'static str,
    pub limit: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaterStandard {
    pub name: &'static str,
    pub limits: &'static [ParameterLimit],
}

const fn limit(parameter: &'static str, limit: &'static str) -> ParameterLimit {
    ParameterLimit { parameter, limit }
}

static STANDARDS: [WaterStandard; 3] = [
    WaterStandard {
        name: "WHO Standards",
        limits: &[
            limit("TDS", "≤ 500 ppm (recommended)"),
            limit("Temperature", "Cool, preferably 10-15°C for drinking"),
            limit("pH", "6.5-8.5"),
            limit("Turbidity", "< 5 NTU"),
        ],
    },
    WaterStandard {
        name: "EPA Standards",
        limits: &[
            limit("TDS", "500 ppm (secondary standard)"),
            limit("Temperature", "Based on local conditions"),
            limit("pH", "6.5-8.5"),
            limit("Chlorine", "< 4 mg/L"),
        ],
    },
    WaterStandard {
        name: "BIS Standards (India)",
        limits: &[
            limit("TDS", "500 ppm (acceptable), 2000 ppm (permissible)"),
            limit("Temperature", "Ambient"),
            limit("pH", "6.5-8.5"),
            limit("Hardness", "< 300 mg/L"),
        ],
    },
];

pub fn water_quality_standards() -> &'static [WaterStandard] {
    &STANDARDS
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_three_bodies_with_limits() {
        // ---
        let standards = water_quality_standards();
        let names: Vec<_> = standards.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["WHO Standards", "EPA Standards", "BIS Standards (India)"]
        );
        for standard in standards {
            assert!((3..=4).contains(&standard.limits.len()), "{}", standard.name);
            assert!(standard.limits.iter().any(|l| l.parameter == "TDS"));
        }
    }
}

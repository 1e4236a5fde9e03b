//! Improvement suggestions combining TDS, temperature and general upkeep.

use crate::Measurement;

const NO_DATA: &[&str] = &[
    "Connect water quality sensors",
    "Enable data collection system",
    "Check sensor connections and power",
];

const DEMINERALIZED: &[&str] = &[
    "Add mineral supplements for drinking water",
    "Consider a remineralization filter system",
    "Mix with natural mineral water for drinking",
    "Monitor mineral levels regularly",
];

const HEALTHY: &[&str] = &[
    "Maintain current filtration system",
    "Regular quarterly water testing recommended",
    "Monitor for sudden TDS changes",
    "Continue good water storage practices",
];

const ELEVATED: &[&str] = &[
    "Install an RO water purification system",
    "Use activated carbon filters",
    "Consider UV purification for bacteria",
    "Test for specific contaminants (lead, arsenic)",
    "Improve source water protection",
];

const CONTAMINATED: &[&str] = &[
    "IMMEDIATE: Install an RO purification system",
    "Use bottled water for drinking and cooking",
    "Professional water testing needed immediately",
    "Check plumbing system for contamination sources",
    "Install a whole-house filtration system",
];

const HAZARDOUS: &[&str] = &[
    "CRITICAL: Use bottled water immediately",
    "Contact water quality authorities immediately",
    "Professional remediation required",
    "Comprehensive water testing essential",
    "Consider alternative water sources",
];

const COOL_STORAGE: &[&str] = &[
    "Store water in a cool, dark place",
    "Use insulated water containers",
    "Monitor for bacterial growth regularly",
    "Reduce water storage time",
];

const WARM_BEFORE_DRINKING: &[&str] = &[
    "Allow water to reach room temperature before drinking",
    "Check for pipe insulation issues",
    "Consider water heating options",
    "Monitor for freezing in cold weather",
];

const GENERAL: &[&str] = &[
    "Regular monitoring with this dashboard",
    "Maintain a water quality log",
    "Set up alerts for quality changes",
    "Consider environmental factors affecting the water source",
];

fn tds_block(tds: Measurement) -> &'static [&'static str] {
    match tds.value() {
        None => NO_DATA,
        Some(ppm) if ppm < 50.0 => DEMINERALIZED,
        Some(ppm) if ppm < 250.0 => HEALTHY,
        Some(ppm) if ppm < 500.0 => ELEVATED,
        Some(ppm) if ppm < 900.0 => CONTAMINATED,
        Some(_) => HAZARDOUS,
    }
}

fn temperature_block(temperature: Measurement) -> &'static [&'static str] {
    match temperature.value() {
        Some(t) if t > 35.0 => COOL_STORAGE,
        Some(t) if t < 10.0 => WARM_BEFORE_DRINKING,
        _ => &[],
    }
}

/// Suggestions in display order: TDS block, temperature block, general block.
pub fn improvement_suggestions(
    tds: impl Into<Measurement>,
    temperature: impl Into<Measurement>,
) -> Vec<&'static str> {
    let tds = tds_block(tds.into());
    let temperature = temperature_block(temperature.into());

    let mut suggestions = Vec::with_capacity(tds.len() + temperature.len() + GENERAL.len());
    suggestions.extend_from_slice(tds);
    suggestions.extend_from_slice(temperature);
    suggestions.extend_from_slice(GENERAL);
    suggestions
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn concat(blocks: &[&[&'static str]]) -> Vec<&'static str> {
        blocks.iter().flat_map(|b| b.iter().copied()).collect()
    }

    #[test]
    fn test_block_order() {
        // ---
        assert_eq!(
            improvement_suggestions(600.0, 40.0),
            concat(&[CONTAMINATED, COOL_STORAGE, GENERAL])
        );
        assert_eq!(
            improvement_suggestions(30.0, 6.0),
            concat(&[DEMINERALIZED, WARM_BEFORE_DRINKING, GENERAL])
        );
    }

    #[test]
    fn test_comfortable_temperature_adds_nothing() {
        // ---
        assert_eq!(
            improvement_suggestions(200.0, 20.0),
            concat(&[HEALTHY, GENERAL])
        );
        // both edges are exclusive
        assert_eq!(improvement_suggestions(200.0, 35.0), concat(&[HEALTHY, GENERAL]));
        assert_eq!(improvement_suggestions(200.0, 10.0), concat(&[HEALTHY, GENERAL]));
    }

    #[test]
    fn test_no_data() {
        // ---
        assert_eq!(
            improvement_suggestions(Measurement::Absent, Measurement::Absent),
            concat(&[NO_DATA, GENERAL])
        );
        // temperature sentinel appends nothing even though 0 < 10
        assert_eq!(improvement_suggestions(0.0, 0.0), concat(&[NO_DATA, GENERAL]));
    }

    #[test]
    fn test_tds_bands() {
        // ---
        assert_eq!(tds_block(Measurement::from(49.9)), DEMINERALIZED);
        assert_eq!(tds_block(Measurement::from(50.0)), HEALTHY);
        assert_eq!(tds_block(Measurement::from(249.9)), HEALTHY);
        assert_eq!(tds_block(Measurement::from(250.0)), ELEVATED);
        assert_eq!(tds_block(Measurement::from(500.0)), CONTAMINATED);
        assert_eq!(tds_block(Measurement::from(900.0)), HAZARDOUS);
    }

    #[test]
    fn test_general_block_always_last() {
        // ---
        for (tds, t) in [(0.0, 0.0), (10.0, 60.0), (1200.0, -2.0), (300.0, 22.0)] {
            let suggestions = improvement_suggestions(tds, t);
            assert!(suggestions.ends_with(GENERAL));
        }
    }
}

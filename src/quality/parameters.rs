//! Simulated secondary water parameters.
//!
//! None of these values are measured. They are illustrative estimates derived
//! from TDS with bounded random jitter, so the dashboard can show a plausible
//! pH, turbidity, chlorine, hardness and alkalinity next to the real readings.
//! Callers must not present them as sensor data. Pass a seeded [`Rng`] to get
//! repeatable output.

use rand::Rng;
use serde::{Serialize, Serializer};

use crate::Measurement;

/// Rendering of every field when there is no TDS reading.
pub const NO_DATA_MARKER: &str = "-";

/// Estimated secondary parameters for one TDS value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterEstimates {
    /// pH, 1 decimal.
    pub ph: f64,
    /// NTU, 1 decimal, at most 10.
    pub turbidity: f64,
    /// Residual chlorine mg/L, 2 decimals.
    pub chlorine: f64,
    /// mg/L as CaCO3.
    pub hardness: i64,
    /// mg/L as CaCO3.
    pub alkalinity: i64,
}

/// Secondary parameters: either all estimated or all unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecondaryParameters {
    NoData,
    Estimated(ParameterEstimates),
}

impl SecondaryParameters {
    pub fn estimates(&self) -> Option<&ParameterEstimates> {
        match self {
            SecondaryParameters::Estimated(e) => Some(e),
            SecondaryParameters::NoData => None,
        }
    }

    /// `(label, rendered value)` pairs in display order.
    pub fn display_rows(&self) -> [(&'static str, String); 5] {
        let render = |v: Option<String>| v.unwrap_or_else(|| NO_DATA_MARKER.to_string());
        let e = self.estimates();
        [
            ("pH", render(e.map(|e| format!("{:.1}", e.ph)))),
            ("Turbidity (NTU)", render(e.map(|e| format!("{:.1}", e.turbidity)))),
            ("Chlorine (mg/L)", render(e.map(|e| format!("{:.2}", e.chlorine)))),
            ("Hardness (mg/L)", render(e.map(|e| e.hardness.to_string()))),
            ("Alkalinity (mg/L)", render(e.map(|e| e.alkalinity.to_string()))),
        ]
    }
}

impl Serialize for SecondaryParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SecondaryParameters::Estimated(e) => e.serialize(serializer),
            SecondaryParameters::NoData => {
                #[derive(Serialize)]
                struct Unavailable {
                    ph: &'static str,
                    turbidity: &'static str,
                    chlorine: &'static str,
                    hardness: &'static str,
                    alkalinity: &'static str,
                }
                Unavailable {
                    ph: NO_DATA_MARKER,
                    turbidity: NO_DATA_MARKER,
                    chlorine: NO_DATA_MARKER,
                    hardness: NO_DATA_MARKER,
                    alkalinity: NO_DATA_MARKER,
                }
                .serialize(serializer)
            }
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Estimate secondary parameters from TDS (ppm).
///
/// Temperature is accepted for interface symmetry with the other advice
/// functions; the current estimates depend on TDS only.
///
/// Hardness and alkalinity are clamped at 0 mg/L. Low TDS plus negative
/// jitter would otherwise produce negative values.
pub fn secondary_parameters<R>(
    tds: impl Into<Measurement>,
    _temperature: impl Into<Measurement>,
    rng: &mut R,
) -> SecondaryParameters
where
    R: Rng,
{
    let Some(ppm) = tds.into().value() else {
        return SecondaryParameters::NoData;
    };

    let (ph_base, ph_jitter) = if ppm < 100.0 {
        (6.8, 0.1..=0.4)
    } else if ppm < 300.0 {
        (7.0, 0.1..=0.5)
    } else if ppm < 600.0 {
        (7.2, 0.1..=0.6)
    } else {
        (7.5, 0.2..=0.8)
    };
    let ph = round_to(ph_base + rng.gen_range(ph_jitter), 1);

    let turbidity = round_to(ppm / 100.0 + rng.gen_range(0.1..=0.5), 1).min(10.0);

    let chlorine = if ppm < 300.0 {
        0.2 + rng.gen_range(0.1..=0.3)
    } else {
        0.1 + rng.gen_range(0.0..=0.2)
    };
    let chlorine = round_to(chlorine, 2);

    let hardness = (ppm * 0.7 + rng.gen_range(-10.0..=10.0)).round().max(0.0) as i64;
    let alkalinity = (ppm * 0.5 + rng.gen_range(-20.0..=20.0)).round().max(0.0) as i64;

    SecondaryParameters::Estimated(ParameterEstimates {
        ph,
        turbidity,
        chlorine,
        hardness,
        alkalinity,
    })
}

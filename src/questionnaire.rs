//! Household water questionnaire scoring.
//!
//! Four categorical answers each map to a fixed number of points; the total
//! (0 to 130) selects one of four recommendation bands. Missing or unknown
//! answers contribute nothing and are never an error.

use serde::{Deserialize, Deserializer, Serialize};

/// Highest reachable score.
pub const MAX_SCORE: u32 = 130;

/// Raw answers as submitted by the questionnaire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionnaireAnswers {
    // ---
    #[serde(default, deserialize_with = "lenient_answer")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub change: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub test: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub filter: Option<String>,
}

/// Keep string answers; any other JSON value counts as unanswered.
fn lenient_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterSource {
    Municipal,
    Filtered,
    Bottled,
    Well,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterChange {
    No,
    Slight,
    Noticeable,
    Significant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFrequency {
    ThreeMonths,
    SixMonths,
    Yearly,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSystem {
    ReverseOsmosis,
    Ultraviolet,
    Carbon,
    None,
}

impl WaterSource {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "municipal" => Some(Self::Municipal),
            "filtered" => Some(Self::Filtered),
            "bottled" => Some(Self::Bottled),
            "well" => Some(Self::Well),
            _ => None,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Self::Municipal | Self::Filtered => 30,
            Self::Bottled => 25,
            Self::Well => 15,
        }
    }
}

impl WaterChange {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "no" => Some(Self::No),
            "slight" => Some(Self::Slight),
            "noticeable" => Some(Self::Noticeable),
            "significant" => Some(Self::Significant),
            _ => None,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Self::No => 40,
            Self::Slight => 30,
            Self::Noticeable => 15,
            Self::Significant => 5,
        }
    }
}

impl TestFrequency {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "3months" => Some(Self::ThreeMonths),
            "6months" => Some(Self::SixMonths),
            "1year" => Some(Self::Yearly),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Self::ThreeMonths => 30,
            Self::SixMonths => 20,
            Self::Yearly => 10,
            Self::Never => 0,
        }
    }
}

impl FilterSystem {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "ro" => Some(Self::ReverseOsmosis),
            "uv" => Some(Self::Ultraviolet),
            "carbon" => Some(Self::Carbon),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Self::ReverseOsmosis => 30,
            Self::Ultraviolet => 25,
            Self::Carbon => 20,
            Self::None => 5,
        }
    }
}

/// Sum of the points for every recognised answer.
pub fn score(answers: &QuestionnaireAnswers) -> u32 {
    fn points<T>(answer: &Option<String>, parse: fn(&str) -> Option<T>, value: fn(T) -> u32) -> u32 {
        answer.as_deref().and_then(parse).map_or(0, value)
    }

    points(&answers.source, WaterSource::parse, WaterSource::points)
        + points(&answers.change, WaterChange::parse, WaterChange::points)
        + points(&answers.test, TestFrequency::parse, TestFrequency::points)
        + points(&answers.filter, FilterSystem::parse, FilterSystem::points)
}

/// Recommendation band, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsAttention,
    Critical,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::NeedsAttention
        } else {
            Self::Critical
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::Excellent => &[
                "Your water quality practices are excellent!",
                "Continue regular maintenance and monitoring.",
                "Consider annual professional testing to maintain standards.",
            ],
            Self::Good => &[
                "Your water quality is generally good.",
                "Consider more frequent filter changes (every 3-6 months).",
                "Schedule professional testing within 6 months.",
            ],
            Self::NeedsAttention => &[
                "Your water quality needs attention.",
                "Install or upgrade your water filtration system.",
                "Schedule immediate professional testing.",
                "Consider using bottled water temporarily.",
            ],
            Self::Critical => &[
                "Immediate action required for water quality.",
                "Use bottled water for drinking immediately.",
                "Contact your water authority with concerns.",
                "Schedule comprehensive professional testing.",
            ],
        }
    }
}

pub fn recommendations_for_score(score: u32) -> &'static [&'static str] {
    ScoreBand::for_score(score).recommendations()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn answers(source: &str, change: &str, test: &str, filter: &str) -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            source: Some(source.to_string()),
            change: Some(change.to_string()),
            test: Some(test.to_string()),
            filter: Some(filter.to_string()),
        }
    }

    #[test]
    fn test_max_score() {
        // ---
        assert_eq!(score(&answers("municipal", "no", "3months", "ro")), MAX_SCORE);
        assert_eq!(score(&answers("filtered", "no", "3months", "ro")), MAX_SCORE);
    }

    #[test]
    fn test_empty_and_unknown_answers() {
        // ---
        assert_eq!(score(&QuestionnaireAnswers::default()), 0);
        let unknown = QuestionnaireAnswers {
            source: Some("unknown_value".to_string()),
            ..Default::default()
        };
        assert_eq!(score(&unknown), 0);
        assert_eq!(score(&answers("lake", "maybe", "weekly", "magic")), 0);
    }

    #[test]
    fn test_partial_answers() {
        // ---
        let partial = QuestionnaireAnswers {
            source: Some("well".to_string()),
            filter: Some("carbon".to_string()),
            ..Default::default()
        };
        assert_eq!(score(&partial), 35);
        assert_eq!(score(&answers("bottled", "slight", "6months", "uv")), 100);
        assert_eq!(score(&answers("well", "significant", "never", "none")), 25);
    }

    #[test]
    fn test_band_edges() {
        // ---
        assert_eq!(recommendations_for_score(130), recommendations_for_score(80));
        assert_ne!(recommendations_for_score(79), recommendations_for_score(80));
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::NeedsAttention);
        assert_eq!(ScoreBand::for_score(40), ScoreBand::NeedsAttention);
        assert_eq!(ScoreBand::for_score(39), ScoreBand::Critical);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Critical);
    }

    #[test]
    fn test_band_list_sizes() {
        // ---
        for band in [
            ScoreBand::Excellent,
            ScoreBand::Good,
            ScoreBand::NeedsAttention,
            ScoreBand::Critical,
        ] {
            assert!((3..=4).contains(&band.recommendations().len()));
        }
    }

    #[test]
    fn test_answers_from_json() {
        // ---
        let parsed: QuestionnaireAnswers =
            serde_json::from_str(r#"{"source": "municipal", "filter": "ro", "extra": 1}"#).unwrap();
        assert_eq!(score(&parsed), 60);
    }

    #[test]
    fn test_non_string_answers_score_zero() {
        // ---
        let parsed: QuestionnaireAnswers =
            serde_json::from_str(r#"{"source": 5, "change": "no", "test": true, "filter": null}"#)
                .unwrap();
        assert_eq!(parsed.source, None);
        assert_eq!(parsed.test, None);
        assert_eq!(score(&parsed), 40);

        let nested: QuestionnaireAnswers =
            serde_json::from_str(r#"{"source": ["municipal"], "filter": {"kind": "ro"}}"#).unwrap();
        assert_eq!(score(&nested), 0);
    }
}

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 5;

/// Highest selectable option index.
pub const MAX_ANSWER_VALUE: u8 = (OPTION_COUNT - 1) as u8;

/// Question id to selected option index. Absent ids are unanswered.
pub type AnswerMap = BTreeMap<String, u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Psychometric,
    Technical,
    Wiscar,
}

impl SectionKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Psychometric, Self::Technical, Self::Wiscar]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Psychometric => "psychometric",
            Self::Technical => "technical",
            Self::Wiscar => "wiscar",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Psychometric => "Psychological Evaluation",
            Self::Technical => "Technical Aptitude",
            Self::Wiscar => "WISCAR Framework",
        }
    }
}

/// Informational tag subdividing a section. Scoring never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Interest,
    Motivation,
    Grit,
    WorkingStyle,
    GrowthMindset,
    Purpose,
    Collaboration,
    Adaptability,
    Knowledge,
    Analytical,
    Methodology,
    Application,
    Cognitive,
    RealWorldAlignment,
    AbilityToLearn,
    Skill,
    Will,
}

impl QuestionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Interest => "Interest",
            Self::Motivation => "Motivation",
            Self::Grit => "Grit",
            Self::WorkingStyle => "Working Style",
            Self::GrowthMindset => "Growth Mindset",
            Self::Purpose => "Purpose",
            Self::Collaboration => "Collaboration",
            Self::Adaptability => "Adaptability",
            Self::Knowledge => "Knowledge",
            Self::Analytical => "Analytical",
            Self::Methodology => "Methodology",
            Self::Application => "Application",
            Self::Cognitive => "Cognitive",
            Self::RealWorldAlignment => "Real-World Alignment",
            Self::AbilityToLearn => "Ability to Learn",
            Self::Skill => "Skill",
            Self::Will => "Will",
        }
    }
}

/// How a raw option index turns into credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringKind {
    /// The option index is the credit.
    Direct,
    /// Graded against the correct option from the answer key.
    AnswerKey { correct: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: [&'static str; OPTION_COUNT],
    pub category: QuestionCategory,
    pub weight: f64,
    #[serde(skip)]
    pub scoring: ScoringKind,
}

impl Question {
    pub fn option_label(&self, value: u8) -> Option<&'static str> {
        self.options.get(usize::from(value)).copied()
    }
}

/// A completed answer snapshot, as submitted or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentData {
    #[serde(default)]
    pub answers: AnswerMap,
    #[serde(alias = "completedAt")]
    pub completed_at: String,
}

impl AssessmentData {
    pub fn new(answers: AnswerMap, completed_at: DateTime<Utc>) -> Self {
        Self {
            answers,
            completed_at: completed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_camel_case_timestamp_key() {
        let raw = r#"{"answers":{"psych_001":3},"completedAt":"2025-03-14T09:30:00.000Z"}"#;
        let data: AssessmentData = serde_json::from_str(raw).expect("stored record parses");
        assert_eq!(data.answers.get("psych_001"), Some(&3));
        assert_eq!(data.completed_at, "2025-03-14T09:30:00.000Z");
    }

    #[test]
    fn formats_timestamp_like_an_iso_string() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).single().expect("valid");
        let data = AssessmentData::new(AnswerMap::new(), at);
        assert_eq!(data.completed_at, "2025-03-14T09:30:00.000Z");
    }

    #[test]
    fn sections_are_ordered_psychometric_first() {
        let keys: Vec<_> = SectionKind::ordered().iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["psychometric", "technical", "wiscar"]);
    }
}

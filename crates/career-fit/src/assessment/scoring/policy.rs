use serde::Serialize;

/// Recommendation tier derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FitTier {
    #[serde(rename = "Excellent Fit")]
    Excellent,
    #[serde(rename = "Good Fit")]
    Good,
    #[serde(rename = "Moderate Fit")]
    Moderate,
    #[serde(rename = "Limited Fit")]
    Limited,
}

/// Lower bounds, checked in descending order.
const TIER_THRESHOLDS: [(u8, FitTier); 3] = [
    (80, FitTier::Excellent),
    (65, FitTier::Good),
    (50, FitTier::Moderate),
];

impl FitTier {
    pub fn from_overall(overall: u8) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(floor, _)| overall >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(FitTier::Limited)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Fit",
            Self::Good => "Good Fit",
            Self::Moderate => "Moderate Fit",
            Self::Limited => "Limited Fit",
        }
    }

    pub const fn feedback(self) -> &'static str {
        match self {
            Self::Excellent => "You show exceptional alignment with biodiversity impact assessment careers. Your strong motivation, technical aptitude, and learning capacity make you an ideal candidate for this field.",
            Self::Good => "You demonstrate good alignment with biodiversity careers. With some focused learning and skill development, you can excel in environmental impact assessment roles.",
            Self::Moderate => "You show moderate potential for biodiversity careers. Consider strengthening your technical knowledge and exploring related fields that align with your interests.",
            Self::Limited => "Your current profile suggests exploring adjacent environmental fields like policy, education, or communications might be better aligned with your strengths and interests.",
        }
    }
}

/// Display band for a single percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Developing,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Strong,
            60..=79 => Self::Moderate,
            _ => Self::Developing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchRule {
    /// `min(cap, overall + offset)`
    Capped { offset: i16, cap: i16 },
    /// `max(floor, overall + offset)`
    Floored { offset: i16, floor: i16 },
}

impl MatchRule {
    fn apply(self, overall: u8) -> u8 {
        let overall = i16::from(overall);
        let value = match self {
            MatchRule::Capped { offset, cap } => (overall + offset).min(cap),
            MatchRule::Floored { offset, floor } => (overall + offset).max(floor),
        };
        value.clamp(0, 100) as u8
    }
}

struct CareerTemplate {
    title: &'static str,
    description: &'static str,
    salary_range: &'static str,
    rule: MatchRule,
}

const CAREERS: [CareerTemplate; 4] = [
    CareerTemplate {
        title: "Biodiversity Impact Assessor",
        description: "Evaluate environmental impacts of development projects on species and ecosystems.",
        salary_range: "$55,000 - $85,000",
        rule: MatchRule::Capped { offset: 10, cap: 95 },
    },
    CareerTemplate {
        title: "Environmental Consultant",
        description: "Advise organizations on nature-friendly practices and regulatory compliance.",
        salary_range: "$60,000 - $100,000",
        rule: MatchRule::Capped { offset: 5, cap: 90 },
    },
    CareerTemplate {
        title: "Conservation Scientist",
        description: "Manage natural resources with focus on species and habitat conservation.",
        salary_range: "$55,000 - $88,000",
        rule: MatchRule::Floored { offset: -5, floor: 60 },
    },
    CareerTemplate {
        title: "Ecologist",
        description: "Study relationships between organisms and their environment through field and lab work.",
        salary_range: "$60,000 - $90,000",
        rule: MatchRule::Floored { offset: 0, floor: 65 },
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerRecommendation {
    pub title: &'static str,
    pub description: &'static str,
    pub match_percent: u8,
    pub salary_range: &'static str,
}

pub(crate) fn career_recommendations(overall: u8) -> Vec<CareerRecommendation> {
    CAREERS
        .iter()
        .map(|career| CareerRecommendation {
            title: career.title,
            description: career.description,
            match_percent: career.rule.apply(overall),
            salary_range: career.salary_range,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningPhase {
    pub level: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub skills: &'static [&'static str],
}

const LEARNING_PATH: [LearningPhase; 3] = [
    LearningPhase {
        level: "Foundation",
        description: "Build core knowledge in ecology, biodiversity concepts, and environmental science fundamentals.",
        duration: "3-4 weeks",
        skills: &[
            "Basic Ecology",
            "Ecosystem Services",
            "Species Identification",
            "Conservation Principles",
        ],
    },
    LearningPhase {
        level: "Intermediate",
        description: "Develop technical skills in impact assessment, GIS, and biodiversity monitoring methods.",
        duration: "6-8 weeks",
        skills: &[
            "EIA Frameworks",
            "GIS Mapping",
            "Data Collection",
            "Statistical Analysis",
            "Report Writing",
        ],
    },
    LearningPhase {
        level: "Advanced",
        description: "Gain practical experience through projects, internships, and specialized training programs.",
        duration: "3-6 months",
        skills: &[
            "Mitigation Planning",
            "Stakeholder Engagement",
            "Policy Knowledge",
            "Project Management",
        ],
    },
];

pub(crate) fn learning_path() -> Vec<LearningPhase> {
    LEARNING_PATH.to_vec()
}

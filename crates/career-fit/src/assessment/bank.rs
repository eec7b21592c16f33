use super::domain::{Question, QuestionCategory, ScoringKind, SectionKind, MAX_ANSWER_VALUE, OPTION_COUNT};
use serde::Serialize;
use std::collections::HashSet;

/// Correct option per technical question. Only knowledge questions are graded
/// against it; the remaining entries are kept for reference.
const ANSWER_KEY: [(&str, u8); 7] = [
    ("tech_001", 2),
    ("tech_002", 2),
    ("tech_003", 2),
    ("tech_004", 1),
    ("tech_005", 3),
    ("tech_006", 3),
    ("tech_008", 1),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    #[serde(rename = "section")]
    pub kind: SectionKind,
    pub title: &'static str,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(kind: SectionKind, questions: Vec<Question>) -> Self {
        Self {
            kind,
            title: kind.title(),
            questions,
        }
    }
}

/// Ordered, immutable catalog of assessment sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionBank {
    sections: Vec<Section>,
}

impl QuestionBank {
    pub fn new(sections: Vec<Section>) -> Result<Self, BankError> {
        if sections.is_empty() {
            return Err(BankError::NoSections);
        }

        let mut seen_sections = HashSet::new();
        let mut seen_ids = HashSet::new();
        for section in &sections {
            if !seen_sections.insert(section.kind) {
                return Err(BankError::DuplicateSection(section.kind));
            }
            if section.questions.is_empty() {
                return Err(BankError::EmptySection(section.kind));
            }
            for question in &section.questions {
                if !seen_ids.insert(question.id) {
                    return Err(BankError::DuplicateQuestion(question.id.to_string()));
                }
                if !question.weight.is_finite() || question.weight <= 0.0 {
                    return Err(BankError::InvalidWeight {
                        question_id: question.id.to_string(),
                        weight: question.weight,
                    });
                }
                if let ScoringKind::AnswerKey { correct } = question.scoring {
                    if correct > MAX_ANSWER_VALUE {
                        return Err(BankError::InvalidAnswerKey {
                            question_id: question.id.to_string(),
                            correct,
                        });
                    }
                }
            }
        }

        Ok(Self { sections })
    }

    pub fn standard() -> Self {
        Self {
            sections: vec![
                Section::new(SectionKind::Psychometric, psychometric_questions()),
                Section::new(SectionKind::Technical, technical_questions()),
                Section::new(SectionKind::Wiscar, wiscar_questions()),
            ],
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|question| question.id == id)
    }

    pub fn total_questions(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BankError {
    #[error("question bank has no sections")]
    NoSections,
    #[error("section {0:?} appears more than once")]
    DuplicateSection(SectionKind),
    #[error("section {0:?} has no questions")]
    EmptySection(SectionKind),
    #[error("question id {0} is not unique")]
    DuplicateQuestion(String),
    #[error("question {question_id} has non-positive weight {weight}")]
    InvalidWeight { question_id: String, weight: f64 },
    #[error("question {question_id} keys option {correct}, beyond the last option")]
    InvalidAnswerKey { question_id: String, correct: u8 },
}

fn scoring_for(id: &str, category: QuestionCategory) -> ScoringKind {
    if category != QuestionCategory::Knowledge {
        return ScoringKind::Direct;
    }
    ANSWER_KEY
        .iter()
        .find(|(key_id, _)| *key_id == id)
        .map(|(_, correct)| ScoringKind::AnswerKey { correct: *correct })
        .unwrap_or(ScoringKind::Direct)
}

fn question(
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; OPTION_COUNT],
    category: QuestionCategory,
    weight: f64,
) -> Question {
    Question {
        id,
        prompt,
        options,
        category,
        weight,
        scoring: scoring_for(id, category),
    }
}

fn psychometric_questions() -> Vec<Question> {
    vec![
        question(
            "psych_001",
            "I enjoy exploring ecosystems, species interactions, and biodiversity databases.",
            ["Strongly Disagree", "Disagree", "Neutral", "Agree", "Strongly Agree"],
            QuestionCategory::Interest,
            1.2,
        ),
        question(
            "psych_002",
            "I am deeply motivated by the need to reduce human impacts on ecosystems.",
            [
                "Not at all motivated",
                "Slightly motivated",
                "Moderately motivated",
                "Highly motivated",
                "Extremely motivated",
            ],
            QuestionCategory::Motivation,
            1.3,
        ),
        question(
            "psych_003",
            "I remain consistent and persistent when faced with scientific setbacks or challenges.",
            ["Rarely", "Sometimes", "Often", "Usually", "Always"],
            QuestionCategory::Grit,
            1.1,
        ),
        question(
            "psych_004",
            "I prefer structured field research over ambiguous, creative projects.",
            [
                "Strongly prefer creative projects",
                "Prefer creative projects",
                "No preference",
                "Prefer structured research",
                "Strongly prefer structured research",
            ],
            QuestionCategory::WorkingStyle,
            1.0,
        ),
        question(
            "psych_005",
            "Even if I'm not good at statistics now, I believe I can learn and improve.",
            ["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"],
            QuestionCategory::GrowthMindset,
            1.2,
        ),
        question(
            "psych_006",
            "I find fulfillment in work that directly contributes to environmental conservation.",
            [
                "Not fulfilling at all",
                "Slightly fulfilling",
                "Moderately fulfilling",
                "Very fulfilling",
                "Extremely fulfilling",
            ],
            QuestionCategory::Purpose,
            1.3,
        ),
        question(
            "psych_007",
            "I enjoy working both independently in the field and collaboratively with teams.",
            [
                "Strongly prefer working alone",
                "Prefer working alone",
                "No preference",
                "Prefer collaborative work",
                "Strongly prefer collaborative work",
            ],
            QuestionCategory::Collaboration,
            1.0,
        ),
        question(
            "psych_008",
            "I am comfortable with uncertainty and adapting to changing environmental conditions.",
            [
                "Very uncomfortable",
                "Uncomfortable",
                "Neutral",
                "Comfortable",
                "Very comfortable",
            ],
            QuestionCategory::Adaptability,
            1.1,
        ),
    ]
}

fn technical_questions() -> Vec<Question> {
    vec![
        question(
            "tech_001",
            "Biodiversity refers to the variety of life at which levels?",
            [
                "Only species level",
                "Species and genetic levels only",
                "Genetic, species, and ecosystem levels",
                "Only ecosystem level",
                "Cultural and social levels only",
            ],
            QuestionCategory::Knowledge,
            1.0,
        ),
        question(
            "tech_002",
            "The IUCN Red List is primarily used to:",
            [
                "Track pollution levels",
                "Classify climate zones",
                "Assess extinction risk of species",
                "Monitor deforestation rates",
                "Measure economic impacts",
            ],
            QuestionCategory::Knowledge,
            1.0,
        ),
        question(
            "tech_003",
            "In the mitigation hierarchy, what is the correct order of actions?",
            [
                "Offset, Restore, Minimize, Avoid",
                "Minimize, Avoid, Restore, Offset",
                "Avoid, Minimize, Restore, Offset",
                "Restore, Avoid, Minimize, Offset",
                "Avoid, Restore, Minimize, Offset",
            ],
            QuestionCategory::Knowledge,
            1.2,
        ),
        question(
            "tech_004",
            "If a forest habitat loses 30% of its area, approximately what percentage of species might be lost according to species-area relationships?",
            ["5-10%", "10-15%", "15-20%", "25-30%", "30-35%"],
            QuestionCategory::Analytical,
            1.1,
        ),
        question(
            "tech_005",
            "Which of the following is NOT typically a direct threat to biodiversity?",
            [
                "Habitat fragmentation",
                "Invasive species",
                "Climate change",
                "Renewable energy development",
                "Pollution",
            ],
            QuestionCategory::Knowledge,
            1.0,
        ),
        question(
            "tech_006",
            "Ecosystem services include:",
            [
                "Only provisioning services like food and water",
                "Only regulating services like climate control",
                "Only cultural services like recreation",
                "Provisioning, regulating, cultural, and supporting services",
                "Only supporting services like nutrient cycling",
            ],
            QuestionCategory::Knowledge,
            1.1,
        ),
        question(
            "tech_007",
            "You need to assess biodiversity in two different sites. Which approach would be most appropriate?",
            [
                "Count only the largest, most visible species",
                "Use standardized sampling methods across multiple taxa",
                "Focus only on endangered species",
                "Sample only during one season",
                "Count species without considering abundance",
            ],
            QuestionCategory::Methodology,
            1.2,
        ),
        question(
            "tech_008",
            "Environmental Impact Assessments (EIAs) typically include biodiversity assessments to:",
            [
                "Meet legal requirements only",
                "Identify and mitigate potential impacts on species and ecosystems",
                "Increase project costs",
                "Delay project approval",
                "Satisfy public interest groups",
            ],
            QuestionCategory::Application,
            1.2,
        ),
    ]
}

fn wiscar_questions() -> Vec<Question> {
    vec![
        question(
            "wiscar_001",
            "When faced with complex ecological problems, I tend to:",
            [
                "Look for simple, quick solutions",
                "Get overwhelmed and avoid the problem",
                "Break it down into manageable components",
                "Wait for others to solve it",
                "Guess at solutions without analysis",
            ],
            QuestionCategory::Cognitive,
            1.2,
        ),
        question(
            "wiscar_002",
            "My ideal work environment would involve:",
            [
                "Only office-based computer work",
                "Only outdoor fieldwork",
                "A mix of fieldwork, lab analysis, and office tasks",
                "Only laboratory research",
                "Only policy and administrative work",
            ],
            QuestionCategory::RealWorldAlignment,
            1.3,
        ),
        question(
            "wiscar_003",
            "When learning new concepts in ecology or conservation, I:",
            [
                "Struggle to understand and give up quickly",
                "Need extensive help and support",
                "Can learn with moderate effort and guidance",
                "Pick up concepts relatively easily",
                "Excel at rapid learning and application",
            ],
            QuestionCategory::AbilityToLearn,
            1.2,
        ),
        question(
            "wiscar_004",
            "My current skills in data analysis and statistics are:",
            [
                "Non-existent - I avoid numbers entirely",
                "Very basic - I can do simple calculations",
                "Moderate - I can handle basic statistical concepts",
                "Good - I'm comfortable with statistical software",
                "Excellent - I can conduct complex analyses",
            ],
            QuestionCategory::Skill,
            1.1,
        ),
        question(
            "wiscar_005",
            "I would describe my dedication to environmental causes as:",
            [
                "Minimal - it's just a job consideration",
                "Casual - I care but it's not a priority",
                "Moderate - I try to make environmentally conscious choices",
                "Strong - Environmental issues are very important to me",
                "Passionate - I'm willing to dedicate my career to this cause",
            ],
            QuestionCategory::Will,
            1.4,
        ),
        question(
            "wiscar_006",
            "When working on long-term projects (6+ months), I typically:",
            [
                "Lose interest after a few weeks",
                "Struggle to maintain focus",
                "Stay engaged with occasional motivation dips",
                "Maintain steady progress throughout",
                "Become more motivated as the project progresses",
            ],
            QuestionCategory::Will,
            1.2,
        ),
    ]
}

mod policy;
mod rules;

pub use policy::{CareerRecommendation, FitTier, LearningPhase, ScoreBand};

use super::bank::QuestionBank;
use super::domain::{AnswerMap, AssessmentData, SectionKind, MAX_ANSWER_VALUE};
use chrono::DateTime;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Pure scorer bound to a question bank.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    bank: Arc<QuestionBank>,
}

impl ScoringEngine {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self { bank }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(QuestionBank::standard()))
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn score(&self, data: &AssessmentData) -> Result<AssessmentResults, AssessmentError> {
        self.calculate(&data.answers, &data.completed_at)
    }

    pub fn calculate(
        &self,
        answers: &AnswerMap,
        completed_at: &str,
    ) -> Result<AssessmentResults, AssessmentError> {
        DateTime::parse_from_rfc3339(completed_at.trim()).map_err(|source| {
            AssessmentError::InvalidTimestamp {
                value: completed_at.to_string(),
                source,
            }
        })?;

        for (question_id, value) in answers {
            if *value > MAX_ANSWER_VALUE {
                return Err(AssessmentError::AnswerOutOfRange {
                    question_id: question_id.clone(),
                    value: *value,
                });
            }
            if self.bank.question(question_id).is_none() {
                debug!(%question_id, "ignoring answer for unknown question");
            }
        }

        let section_breakdown: Vec<SectionScoreView> = self
            .bank
            .sections()
            .iter()
            .map(|section| {
                let tally = rules::tally_section(section, answers);
                let score = tally.percentage();
                SectionScoreView {
                    section: section.kind,
                    title: section.title,
                    score,
                    band: ScoreBand::from_score(score),
                    answered: tally.answered,
                    total: section.questions.len(),
                }
            })
            .collect();

        let score_for = |kind: SectionKind| {
            section_breakdown
                .iter()
                .find(|view| view.section == kind)
                .map(|view| view.score)
                .unwrap_or(0)
        };

        let psychometric_score = score_for(SectionKind::Psychometric);
        let technical_score = score_for(SectionKind::Technical);
        let wiscar_score = score_for(SectionKind::Wiscar);
        let overall_score = rules::blend(score_for);
        let recommendation = FitTier::from_overall(overall_score);

        Ok(AssessmentResults {
            overall_score,
            psychometric_score,
            technical_score,
            wiscar_score,
            recommendation,
            feedback: recommendation.feedback(),
            career_recommendations: policy::career_recommendations(overall_score),
            learning_path: policy::learning_path(),
            section_breakdown,
            completed_at: completed_at.to_string(),
        })
    }
}

/// Scores against the standard question bank.
pub fn calculate_results(
    answers: &AnswerMap,
    completed_at: &str,
) -> Result<AssessmentResults, AssessmentError> {
    static ENGINE: OnceLock<ScoringEngine> = OnceLock::new();
    ENGINE
        .get_or_init(ScoringEngine::standard)
        .calculate(answers, completed_at)
}

/// Per-section percentage with its display band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionScoreView {
    pub section: SectionKind,
    pub title: &'static str,
    pub score: u8,
    pub band: ScoreBand,
    pub answered: usize,
    pub total: usize,
}

/// Everything derived from one scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentResults {
    pub overall_score: u8,
    pub psychometric_score: u8,
    pub technical_score: u8,
    pub wiscar_score: u8,
    pub recommendation: FitTier,
    pub feedback: &'static str,
    pub career_recommendations: Vec<CareerRecommendation>,
    pub learning_path: Vec<LearningPhase>,
    pub section_breakdown: Vec<SectionScoreView>,
    pub completed_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("completed_at '{value}' is not an ISO-8601 timestamp")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("answer {value} for {question_id} is outside option range 0-4")]
    AnswerOutOfRange { question_id: String, value: u8 },
}

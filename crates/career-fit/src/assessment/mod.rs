//! Biodiversity career fit assessment: question bank, scoring, session flow,
//! persistence, and the HTTP surface that exposes them.

pub mod bank;
pub mod domain;
pub mod import;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use bank::{BankError, QuestionBank, Section};
pub use domain::{
    AnswerMap, AssessmentData, Question, QuestionCategory, ScoringKind, SectionKind,
    MAX_ANSWER_VALUE, OPTION_COUNT,
};
pub use import::{parse_answers_csv, ImportError};
pub use router::assessment_router;
pub use scoring::{
    calculate_results, AssessmentError, AssessmentResults, CareerRecommendation, FitTier,
    LearningPhase, ScoreBand, ScoringEngine, SectionScoreView,
};
pub use service::{AssessmentService, Redirect, RedirectReason, ResultsOutcome, ServiceError};
pub use session::{
    AssessmentSession, Cursor, SessionError, SessionEvent, SessionPosition, SessionProgress,
    SessionStep,
};
pub use store::{AssessmentStore, InMemoryStore, JsonFileStore, StoreError, STORAGE_KEY};

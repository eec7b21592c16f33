use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::bank::QuestionBank;
use super::domain::AssessmentData;
use super::scoring::{AssessmentError, AssessmentResults, ScoringEngine};
use super::store::{AssessmentStore, StoreError};

/// Where respondents land when there is nothing valid to show.
pub const ENTRY_POINT: &str = "/";

/// Service composing the store and the scoring engine.
pub struct AssessmentService<S> {
    store: Arc<S>,
    engine: Arc<ScoringEngine>,
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_engine(store, Arc::new(ScoringEngine::standard()))
    }

    pub fn with_engine(store: Arc<S>, engine: Arc<ScoringEngine>) -> Self {
        Self { store, engine }
    }

    /// The question bank respondents are served.
    pub fn questions(&self) -> &QuestionBank {
        self.engine.bank()
    }

    /// Score without persisting anything.
    pub fn score(&self, data: &AssessmentData) -> Result<AssessmentResults, ServiceError> {
        Ok(self.engine.score(data)?)
    }

    /// Validate and score a completed assessment, then persist the snapshot.
    pub fn submit(&self, data: AssessmentData) -> Result<AssessmentResults, ServiceError> {
        let results = self.engine.score(&data)?;
        self.store.save(&data)?;

        info!(
            overall = results.overall_score,
            recommendation = results.recommendation.label(),
            answered = data.answers.len(),
            "assessment submitted"
        );
        Ok(results)
    }

    /// Recompute results from the stored snapshot.
    pub fn results(&self) -> Result<ResultsOutcome, ServiceError> {
        let Some(raw) = self.store.load_raw()? else {
            info!("no stored assessment; redirecting to entry point");
            return Ok(ResultsOutcome::redirect(RedirectReason::Missing));
        };

        let data: AssessmentData = match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, "stored assessment does not parse; redirecting");
                return Ok(ResultsOutcome::redirect(RedirectReason::Corrupt));
            }
        };

        match self.engine.score(&data) {
            Ok(results) => Ok(ResultsOutcome::Ready(results)),
            Err(err) => {
                warn!(error = %err, "stored assessment is invalid; redirecting");
                Ok(ResultsOutcome::redirect(RedirectReason::Corrupt))
            }
        }
    }

    pub fn reset(&self) -> Result<(), ServiceError> {
        self.store.clear()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsOutcome {
    Ready(AssessmentResults),
    Redirect(Redirect),
}

impl ResultsOutcome {
    fn redirect(reason: RedirectReason) -> Self {
        Self::Redirect(Redirect {
            location: ENTRY_POINT,
            reason,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: &'static str,
    pub reason: RedirectReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    Missing,
    Corrupt,
}

impl RedirectReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "no completed assessment found",
            Self::Corrupt => "stored assessment could not be read",
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

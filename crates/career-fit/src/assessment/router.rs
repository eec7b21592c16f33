use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::AssessmentData;
use super::service::{AssessmentService, ResultsOutcome, ServiceError};
use super::store::AssessmentStore;

/// Router builder exposing the questionnaire, scoring, and results endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: AssessmentStore + 'static,
{
    Router::new()
        .route("/api/v1/assessment/questions", get(questions_handler::<S>))
        .route("/api/v1/assessment/score", post(score_handler::<S>))
        .route("/api/v1/assessment/submissions", post(submit_handler::<S>))
        .route(
            "/api/v1/assessment/results",
            get(results_handler::<S>).delete(reset_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn questions_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let bank = service.questions();
    let payload = json!({
        "total_questions": bank.total_questions(),
        "sections": bank.sections(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    payload: Result<axum::Json<AssessmentData>, JsonRejection>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let axum::Json(data) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.score(&data) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    payload: Result<axum::Json<AssessmentData>, JsonRejection>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let axum::Json(data) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.submit(data) {
        Ok(results) => (StatusCode::CREATED, axum::Json(results)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    match service.results() {
        Ok(ResultsOutcome::Ready(results)) => (StatusCode::OK, axum::Json(results)).into_response(),
        Ok(ResultsOutcome::Redirect(redirect)) => {
            let payload = json!({
                "redirect": redirect.location,
                "reason": redirect.reason,
                "message": redirect.reason.label(),
            });
            (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, redirect.location)],
                axum::Json(payload),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reset_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    match service.reset() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// Body rejections share the `{"error": ...}` shape of validation failures.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn error_response(err: ServiceError) -> Response {
    let status = match err {
        ServiceError::Assessment(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

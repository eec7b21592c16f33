use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::assessment::router::{results_handler, submit_handler};
use crate::assessment::store::InMemoryStore;
use crate::assessment::AssessmentService;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

#[tokio::test]
async fn questions_route_lists_sections_without_answer_key() {
    let router = router_with_store(InMemoryStore::default());

    let response = router
        .oneshot(
            Request::get("/api/v1/assessment/questions")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_questions"], 22);
    assert_eq!(body["sections"][0]["section"], "psychometric");
    assert_eq!(body["sections"][2]["questions"].as_array().map(Vec::len), Some(6));
    assert!(body["sections"][1]["questions"][0].get("scoring").is_none());
}

#[tokio::test]
async fn score_route_returns_results_without_persisting() {
    let store = InMemoryStore::default();
    let router = router_with_store(store.clone());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/assessment/score",
            json!({ "answers": { "psych_001": 2 }, "completedAt": COMPLETED_AT }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["psychometric_score"], 50);
    assert_eq!(body["recommendation"], "Limited Fit");
    assert_eq!(body["career_recommendations"][2]["match_percent"], 60);
    assert!(crate::assessment::AssessmentStore::load_raw(&store)
        .expect("load")
        .is_none());
}

#[tokio::test]
async fn submit_then_fetch_results() {
    let store = InMemoryStore::default();

    let response = router_with_store(store.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/assessment/submissions",
            serde_json::to_value(submission(ideal_answers())).expect("encode"),
        ))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router_with_store(store)
        .oneshot(
            Request::get("/api/v1/assessment/results")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["overall_score"], 100);
    assert_eq!(body["recommendation"], "Excellent Fit");
    assert_eq!(body["learning_path"][0]["level"], "Foundation");
    assert_eq!(body["section_breakdown"][1]["band"], "strong");
    assert_eq!(body["completed_at"], COMPLETED_AT);
}

fn assert_json_error(response: &axum::response::Response) {
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn score_route_reports_undecodable_answers_as_json() {
    let response = router_with_store(InMemoryStore::default())
        .oneshot(json_request(
            "POST",
            "/api/v1/assessment/score",
            json!({ "answers": { "psych_001": -1 }, "completed_at": COMPLETED_AT }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_json_error(&response);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("psych_001"));
}

#[tokio::test]
async fn submissions_route_rejects_missing_timestamp_as_json() {
    let store = InMemoryStore::default();

    let response = router_with_store(store.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/assessment/submissions",
            json!({ "answers": { "psych_001": 2 } }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_json_error(&response);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
    assert!(crate::assessment::AssessmentStore::load_raw(&store)
        .expect("load")
        .is_none());
}

#[tokio::test]
async fn malformed_json_keeps_the_error_shape() {
    let request = Request::post("/api/v1/assessment/score")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"answers\": {"))
        .expect("request builds");

    let response = router_with_store(InMemoryStore::default())
        .oneshot(request)
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_error(&response);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn results_handler_redirects_when_nothing_is_stored() {
    let service = Arc::new(AssessmentService::new(Arc::new(InMemoryStore::default())));

    let response = results_handler::<InMemoryStore>(State(service)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/")
    );
    let body = read_json_body(response).await;
    assert_eq!(body["reason"], "missing");
}

#[tokio::test]
async fn results_handler_redirects_on_corrupt_record() {
    let service = Arc::new(AssessmentService::new(Arc::new(InMemoryStore::with_raw(
        "not json at all",
    ))));

    let response = results_handler::<InMemoryStore>(State(service)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let body = read_json_body(response).await;
    assert_eq!(body["reason"], "corrupt");
}

#[tokio::test]
async fn submit_handler_rejects_invalid_timestamp() {
    let service = Arc::new(AssessmentService::new(Arc::new(InMemoryStore::default())));
    let mut data = submission(ideal_answers());
    data.completed_at = "14/03/2025".to_string();

    let response = submit_handler::<InMemoryStore>(State(service), Ok(axum::Json(data))).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("14/03/2025"));
}

#[tokio::test]
async fn submit_handler_reports_store_failures() {
    let service = Arc::new(AssessmentService::new(Arc::new(OfflineStore)));

    let response =
        submit_handler::<OfflineStore>(State(service), Ok(axum::Json(submission(ideal_answers()))))
            .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_results_resets_the_session() {
    let store = InMemoryStore::with_raw("{}");

    let response = router_with_store(store.clone())
        .oneshot(
            Request::delete("/api/v1/assessment/results")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(crate::assessment::AssessmentStore::load_raw(&store)
        .expect("load")
        .is_none());
}

use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{AnswerMap, AssessmentData};
use crate::assessment::store::{AssessmentStore, InMemoryStore, StoreError};
use crate::assessment::{assessment_router, AssessmentService};

pub(super) const COMPLETED_AT: &str = "2025-03-14T09:30:00.000Z";

pub(super) fn answers(pairs: &[(&str, u8)]) -> AnswerMap {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), *value))
        .collect()
}

/// Top option for direct questions and the keyed option for knowledge questions.
pub(super) fn ideal_answers() -> AnswerMap {
    let mut map = AnswerMap::new();
    for index in 1..=8 {
        map.insert(format!("psych_{index:03}"), 4);
    }
    for (id, value) in [
        ("tech_001", 2),
        ("tech_002", 2),
        ("tech_003", 2),
        ("tech_004", 4),
        ("tech_005", 3),
        ("tech_006", 3),
        ("tech_007", 4),
        ("tech_008", 4),
    ] {
        map.insert(id.to_string(), value);
    }
    for index in 1..=6 {
        map.insert(format!("wiscar_{index:03}"), 4);
    }
    map
}

/// Every question answered with the first option.
pub(super) fn floor_answers() -> AnswerMap {
    let mut map = ideal_answers();
    for value in map.values_mut() {
        *value = 0;
    }
    map
}

pub(super) fn submission(answers: AnswerMap) -> AssessmentData {
    AssessmentData {
        answers,
        completed_at: COMPLETED_AT.to_string(),
    }
}

pub(super) fn memory_service() -> (Arc<AssessmentService<InMemoryStore>>, InMemoryStore) {
    let store = InMemoryStore::default();
    let service = Arc::new(AssessmentService::new(Arc::new(store.clone())));
    (service, store)
}

pub(super) fn router_with_store(store: InMemoryStore) -> axum::Router {
    assessment_router(Arc::new(AssessmentService::new(Arc::new(store))))
}

pub(super) struct OfflineStore;

impl AssessmentStore for OfflineStore {
    fn save(&self, _data: &AssessmentData) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("volume offline".to_string()))
    }

    fn load_raw(&self) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("volume offline".to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("volume offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

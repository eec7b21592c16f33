use career_fit::assessment::{parse_answers_csv, AnswerMap};
use career_fit::error::AppError;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

/// Loads answers from whichever source file was given.
pub(crate) fn load_answers(json: Option<&Path>, csv: Option<&Path>) -> Result<AnswerMap, AppError> {
    match (json, csv) {
        (Some(path), None) => load_answers_json(path),
        (None, Some(path)) => load_answers_csv(path),
        (Some(_), Some(_)) => Err(invalid_input("pass either --answers or --answers-csv, not both")),
        (None, None) => Err(invalid_input("an --answers or --answers-csv file is required")),
    }
}

fn invalid_input(message: &str) -> AppError {
    AppError::Io(io::Error::new(io::ErrorKind::InvalidInput, message.to_string()))
}

/// Reads a JSON object of question id to option index.
pub(crate) fn load_answers_json(path: &Path) -> Result<AnswerMap, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_answers_csv(path: &Path) -> Result<AnswerMap, AppError> {
    let file = File::open(path)?;
    Ok(parse_answers_csv(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_timestamp_normalises_offsets_to_utc() {
        let parsed = parse_timestamp(" 2025-09-24T12:00:00+02:00 ").expect("parses");
        assert_eq!(parsed.to_rfc3339(), "2025-09-24T10:00:00+00:00");
    }

    #[test]
    fn parse_timestamp_rejects_plain_dates() {
        let err = parse_timestamp("2025-09-24").expect_err("date only");
        assert!(err.contains("2025-09-24"));
    }

    #[test]
    fn answer_files_load_from_json_and_csv() {
        let dir = tempfile::tempdir().expect("temp dir");

        let json_path = dir.path().join("answers.json");
        std::fs::write(&json_path, r#"{"psych_001": 3, "tech_005": 3}"#).expect("write json");
        let answers = load_answers_json(&json_path).expect("json loads");
        assert_eq!(answers.get("tech_005"), Some(&3));

        let csv_path = dir.path().join("answers.csv");
        let mut file = File::create(&csv_path).expect("create csv");
        writeln!(file, "question_id,answer\npsych_001,3\ntech_005,3").expect("write csv");
        drop(file);
        assert_eq!(load_answers_csv(&csv_path).expect("csv loads"), answers);
    }

    #[test]
    fn load_answers_requires_exactly_one_source() {
        let dir = tempfile::tempdir().expect("temp dir");
        let json_path = dir.path().join("answers.json");
        std::fs::write(&json_path, r#"{"wiscar_003": 2}"#).expect("write json");

        let answers = load_answers(Some(json_path.as_path()), None).expect("json source loads");
        assert_eq!(answers.get("wiscar_003"), Some(&2));

        for result in [
            load_answers(None, None),
            load_answers(Some(json_path.as_path()), Some(json_path.as_path())),
        ] {
            match result {
                Err(AppError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::InvalidInput),
                other => panic!("expected invalid input, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_answer_json_is_a_json_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"psych_001": -1}"#).expect("write json");

        assert!(matches!(load_answers_json(&path), Err(AppError::Json(_))));
        assert!(matches!(
            load_answers_json(&dir.path().join("absent.json")),
            Err(AppError::Io(_))
        ));
    }
}

use super::domain::AnswerMap;
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Reads `question_id,answer` rows into an answer map. Blank answers are skipped.
pub fn parse_answers_csv<R: Read>(reader: R) -> Result<AnswerMap, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut answers = AnswerMap::new();

    for record in csv_reader.deserialize::<AnswerRow>() {
        let row = record?;
        let Some(raw) = row.answer else {
            continue;
        };
        let value = raw.parse::<u8>().map_err(|_| ImportError::InvalidAnswer {
            question_id: row.question_id.clone(),
            value: raw.clone(),
        })?;
        if answers.insert(row.question_id.clone(), value).is_some() {
            return Err(ImportError::DuplicateQuestion(row.question_id));
        }
    }

    Ok(answers)
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    answer: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read answers csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("answer '{value}' for {question_id} is not an option index")]
    InvalidAnswer { question_id: String, value: String },
    #[error("question {0} is answered more than once")]
    DuplicateQuestion(String),
}

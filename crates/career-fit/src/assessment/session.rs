//! Navigation through the questionnaire as an immutable value.
//!
//! Every transition takes the current session and an event and returns the next
//! session (or the completed answer snapshot); nothing is mutated in place.

use super::bank::QuestionBank;
use super::domain::{AnswerMap, AssessmentData, Question, SectionKind, MAX_ANSWER_VALUE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub section: usize,
    pub question: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Answer { value: u8 },
    Next,
    Previous,
    Finish { completed_at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    InProgress(AssessmentSession),
    Completed(AssessmentData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionPosition {
    pub section: SectionKind,
    pub section_title: &'static str,
    pub section_number: usize,
    pub section_count: usize,
    pub question_number: usize,
    pub question_count: usize,
    pub is_final: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub answered: usize,
    pub total: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSession {
    cursor: Cursor,
    answers: AnswerMap,
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn current_question<'b>(&self, bank: &'b QuestionBank) -> Option<&'b Question> {
        bank.sections()
            .get(self.cursor.section)
            .and_then(|section| section.questions.get(self.cursor.question))
    }

    pub fn current_answer(&self, bank: &QuestionBank) -> Option<u8> {
        self.current_question(bank)
            .and_then(|question| self.answers.get(question.id).copied())
    }

    pub fn is_final_question(&self, bank: &QuestionBank) -> bool {
        let sections = bank.sections();
        match sections.len().checked_sub(1) {
            Some(last_section) => {
                self.cursor.section == last_section
                    && self.cursor.question + 1 == sections[last_section].questions.len()
            }
            None => false,
        }
    }

    /// Forward is allowed once the current question has an answer.
    pub fn can_advance(&self, bank: &QuestionBank) -> bool {
        self.current_answer(bank).is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor != Cursor::default()
    }

    pub fn position(&self, bank: &QuestionBank) -> Option<SessionPosition> {
        let section = bank.sections().get(self.cursor.section)?;
        section.questions.get(self.cursor.question)?;
        Some(SessionPosition {
            section: section.kind,
            section_title: section.title,
            section_number: self.cursor.section + 1,
            section_count: bank.sections().len(),
            question_number: self.cursor.question + 1,
            question_count: section.questions.len(),
            is_final: self.is_final_question(bank),
        })
    }

    pub fn progress(&self, bank: &QuestionBank) -> SessionProgress {
        let total = bank.total_questions();
        let answered = bank
            .questions()
            .filter(|question| self.answers.contains_key(question.id))
            .count();
        let percent = if total == 0 {
            0
        } else {
            ((answered as f64 / total as f64) * 100.0).round() as u8
        };
        SessionProgress {
            answered,
            total,
            percent,
        }
    }

    pub fn apply(
        &self,
        bank: &QuestionBank,
        event: SessionEvent,
    ) -> Result<SessionStep, SessionError> {
        let question = self
            .current_question(bank)
            .ok_or(SessionError::CursorOutOfRange(self.cursor))?;

        match event {
            SessionEvent::Answer { value } => {
                if value > MAX_ANSWER_VALUE {
                    return Err(SessionError::AnswerOutOfRange {
                        question_id: question.id.to_string(),
                        value,
                    });
                }
                let mut answers = self.answers.clone();
                answers.insert(question.id.to_string(), value);
                Ok(SessionStep::InProgress(Self {
                    cursor: self.cursor,
                    answers,
                }))
            }
            SessionEvent::Next => {
                self.require_answer(question)?;
                let cursor = self.next_cursor(bank).ok_or(SessionError::EndOfAssessment)?;
                Ok(SessionStep::InProgress(self.moved_to(cursor)))
            }
            SessionEvent::Previous => {
                let cursor = self
                    .previous_cursor(bank)
                    .ok_or(SessionError::AtFirstQuestion)?;
                Ok(SessionStep::InProgress(self.moved_to(cursor)))
            }
            SessionEvent::Finish { completed_at } => {
                if !self.is_final_question(bank) {
                    return Err(SessionError::NotAtFinalQuestion);
                }
                self.require_answer(question)?;
                Ok(SessionStep::Completed(AssessmentData::new(
                    self.answers.clone(),
                    completed_at,
                )))
            }
        }
    }

    fn require_answer(&self, question: &Question) -> Result<(), SessionError> {
        if self.answers.contains_key(question.id) {
            Ok(())
        } else {
            Err(SessionError::Unanswered {
                question_id: question.id.to_string(),
            })
        }
    }

    fn moved_to(&self, cursor: Cursor) -> Self {
        Self {
            cursor,
            answers: self.answers.clone(),
        }
    }

    fn next_cursor(&self, bank: &QuestionBank) -> Option<Cursor> {
        let sections = bank.sections();
        let current = sections.get(self.cursor.section)?;
        if self.cursor.question + 1 < current.questions.len() {
            return Some(Cursor {
                section: self.cursor.section,
                question: self.cursor.question + 1,
            });
        }
        let next_section = self.cursor.section + 1;
        (next_section < sections.len()).then_some(Cursor {
            section: next_section,
            question: 0,
        })
    }

    fn previous_cursor(&self, bank: &QuestionBank) -> Option<Cursor> {
        if self.cursor.question > 0 {
            return Some(Cursor {
                section: self.cursor.section,
                question: self.cursor.question - 1,
            });
        }
        let previous_section = self.cursor.section.checked_sub(1)?;
        let last_question = bank
            .sections()
            .get(previous_section)?
            .questions
            .len()
            .checked_sub(1)?;
        Some(Cursor {
            section: previous_section,
            question: last_question,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("question {question_id} must be answered before moving on")]
    Unanswered { question_id: String },
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("no further questions; finish the assessment instead")]
    EndOfAssessment,
    #[error("the assessment can only be finished from the final question")]
    NotAtFinalQuestion,
    #[error("answer {value} for {question_id} is outside option range 0-4")]
    AnswerOutOfRange { question_id: String, value: u8 },
    #[error("cursor {0:?} does not point at a question")]
    CursorOutOfRange(Cursor),
}

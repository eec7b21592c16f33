use super::super::bank::Section;
use super::super::domain::{AnswerMap, ScoringKind, SectionKind, MAX_ANSWER_VALUE};

/// Credit for a correct keyed answer, and the ceiling of every question.
pub(crate) const FULL_CREDIT: f64 = MAX_ANSWER_VALUE as f64;

/// Share of the raw index awarded for a keyed distractor.
const DISTRACTOR_CREDIT: f64 = 0.5;

/// Overall blend of the section percentages.
const SECTION_BLEND: [(SectionKind, f64); 3] = [
    (SectionKind::Psychometric, 0.4),
    (SectionKind::Technical, 0.3),
    (SectionKind::Wiscar, 0.3),
];

pub(crate) fn credit(kind: ScoringKind, raw: u8) -> f64 {
    match kind {
        ScoringKind::Direct => f64::from(raw),
        ScoringKind::AnswerKey { correct } if raw == correct => FULL_CREDIT,
        ScoringKind::AnswerKey { .. } => f64::from(raw) * DISTRACTOR_CREDIT,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct SectionTally {
    pub weighted_sum: f64,
    pub weight_total: f64,
    pub answered: usize,
}

impl SectionTally {
    /// Rounded 0-100 percentage. A section with nothing answered scores 0.
    pub(crate) fn percentage(&self) -> u8 {
        if self.weight_total <= 0.0 {
            return 0;
        }

        let ratio = self.weighted_sum / (self.weight_total * FULL_CREDIT);
        round_percent(ratio * 100.0)
    }
}

pub(crate) fn tally_section(section: &Section, answers: &AnswerMap) -> SectionTally {
    let mut tally = SectionTally::default();

    for question in &section.questions {
        let Some(&raw) = answers.get(question.id) else {
            continue;
        };
        tally.weighted_sum += credit(question.scoring, raw) * question.weight;
        tally.weight_total += question.weight;
        tally.answered += 1;
    }

    tally
}

pub(crate) fn blend(score_for: impl Fn(SectionKind) -> u8) -> u8 {
    let blended: f64 = SECTION_BLEND
        .iter()
        .map(|(kind, share)| f64::from(score_for(*kind)) * share)
        .sum();
    round_percent(blended)
}

fn round_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

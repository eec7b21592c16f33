use crate::infra::load_answers;
use career_fit::assessment::{
    AnswerMap, AssessmentData, AssessmentResults, AssessmentService, AssessmentSession,
    AssessmentStore, InMemoryStore, JsonFileStore, QuestionBank, ResultsOutcome, ScoringEngine,
    SessionEvent, SessionStep,
};
use career_fit::config::AppConfig;
use career_fit::error::AppError;
use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["answers", "answers_csv"])
))]
pub(crate) struct ScoreArgs {
    /// JSON file mapping question ids to option indexes (0-4)
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// CSV file with a `question_id,answer` header
    #[arg(long)]
    pub(crate) answers_csv: Option<PathBuf>,
    /// Completion time (RFC 3339). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) completed_at: Option<DateTime<Utc>>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ResultsArgs {
    /// Directory holding the stored assessment (defaults to APP_STORE_DIR)
    #[arg(long)]
    pub(crate) store_dir: Option<PathBuf>,
}

/// Answers the demo respondent gives, in question order.
const SAMPLE_RESPONDENT: [(&str, u8); 22] = [
    ("psych_001", 4),
    ("psych_002", 3),
    ("psych_003", 3),
    ("psych_004", 4),
    ("psych_005", 2),
    ("psych_006", 3),
    ("psych_007", 4),
    ("psych_008", 3),
    ("tech_001", 2),
    ("tech_002", 2),
    ("tech_003", 1),
    ("tech_004", 1),
    ("tech_005", 3),
    ("tech_006", 0),
    ("tech_007", 3),
    ("tech_008", 1),
    ("wiscar_001", 4),
    ("wiscar_002", 3),
    ("wiscar_003", 3),
    ("wiscar_004", 4),
    ("wiscar_005", 2),
    ("wiscar_006", 3),
];

pub(crate) fn run_questions() -> Result<(), AppError> {
    let bank = QuestionBank::standard();
    println!(
        "Biodiversity career fit assessment ({} questions)",
        bank.total_questions()
    );

    for (index, section) in bank.sections().iter().enumerate() {
        println!(
            "\nSection {} of {}: {}",
            index + 1,
            bank.sections().len(),
            section.title
        );
        for question in &section.questions {
            println!(
                "- [{}] {} ({})",
                question.id,
                question.prompt,
                question.category.label()
            );
            for (value, option) in question.options.iter().enumerate() {
                println!("    {value}. {option}");
            }
        }
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        answers_csv,
        completed_at,
    } = args;

    let answers = load_answers(answers.as_deref(), answers_csv.as_deref())?;
    let completed_at = completed_at.unwrap_or_else(Utc::now);
    let data = AssessmentData::new(answers, completed_at);

    let results = ScoringEngine::standard().score(&data)?;
    render_results(&results);
    Ok(())
}

pub(crate) fn run_results(args: ResultsArgs) -> Result<(), AppError> {
    let store_dir = match args.store_dir {
        Some(dir) => dir,
        None => AppConfig::load()?.store.dir,
    };
    let store = Arc::new(JsonFileStore::new(store_dir));
    println!("Reading stored assessment from {}", store.path().display());

    let service = AssessmentService::new(store);
    match service.results()? {
        ResultsOutcome::Ready(results) => render_results(&results),
        ResultsOutcome::Redirect(redirect) => {
            println!(
                "No results to show: {}. Start the assessment at {}",
                redirect.reason.label(),
                redirect.location
            );
        }
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Biodiversity career fit demo");
    let store = Arc::new(InMemoryStore::default());
    let service = AssessmentService::new(store.clone());
    let bank = service.questions();

    let answers: AnswerMap = SAMPLE_RESPONDENT
        .iter()
        .map(|(id, value)| (id.to_string(), *value))
        .collect();

    let mut session = AssessmentSession::new();
    let data = loop {
        let Some(position) = session.position(bank) else {
            println!("  Session cursor left the question bank");
            return Ok(());
        };
        if position.question_number == 1 {
            println!(
                "\nSection {}/{}: {} ({} questions)",
                position.section_number,
                position.section_count,
                position.section_title,
                position.question_count
            );
        }

        let Some(question) = session.current_question(bank) else {
            return Ok(());
        };
        let value = answers.get(question.id).copied().unwrap_or(0);
        session = match session.apply(bank, SessionEvent::Answer { value }) {
            Ok(SessionStep::InProgress(next)) => next,
            Ok(SessionStep::Completed(_)) => return Ok(()),
            Err(err) => {
                println!("  Answer rejected: {err}");
                return Ok(());
            }
        };
        println!(
            "- {} -> {}",
            question.prompt,
            question.option_label(value).unwrap_or("?")
        );

        let event = if position.is_final {
            SessionEvent::Finish {
                completed_at: Utc::now(),
            }
        } else {
            SessionEvent::Next
        };
        match session.apply(bank, event) {
            Ok(SessionStep::InProgress(next)) => session = next,
            Ok(SessionStep::Completed(data)) => break data,
            Err(err) => {
                println!("  Navigation rejected: {err}");
                return Ok(());
            }
        }
    };

    let progress = session.progress(bank);
    println!(
        "\nCompleted {}/{} questions ({}%)",
        progress.answered, progress.total, progress.percent
    );

    let submitted = service.submit(data)?;
    println!(
        "- Submitted assessment -> {} ({}%)",
        submitted.recommendation.label(),
        submitted.overall_score
    );

    match store.load_raw() {
        Ok(Some(raw)) => println!("  Stored record: {raw}"),
        Ok(None) => println!("  Store returned no record"),
        Err(err) => println!("  Store unavailable: {err}"),
    }

    match service.results()? {
        ResultsOutcome::Ready(results) => render_results(&results),
        ResultsOutcome::Redirect(redirect) => {
            println!("  Results unavailable: {}", redirect.reason.label());
        }
    }

    Ok(())
}

pub(crate) fn render_results(results: &AssessmentResults) {
    println!("\nAssessment results (completed {})", results.completed_at);
    println!(
        "Overall score: {}% -> {}",
        results.overall_score,
        results.recommendation.label()
    );
    println!("{}", results.feedback);

    println!("\nSection scores");
    for section in &results.section_breakdown {
        println!(
            "- {}: {}% ({:?}) | {}/{} answered",
            section.title, section.score, section.band, section.answered, section.total
        );
    }

    println!("\nCareer matches");
    for career in &results.career_recommendations {
        println!(
            "- {} ({}% match, {})",
            career.title, career.match_percent, career.salary_range
        );
        println!("  {}", career.description);
    }

    println!("\nLearning path");
    for phase in &results.learning_path {
        println!("- {} ({}): {}", phase.level, phase.duration, phase.description);
        println!("  Skills: {}", phase.skills.join(", "));
    }
}

use crate::demo::{run_demo, run_questions, run_results, run_score, ResultsArgs, ScoreArgs};
use crate::server;
use career_fit::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Biodiversity Career Fit",
    about = "Score the biodiversity career fit assessment from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the question bank section by section
    Questions,
    /// Score a set of answers without persisting them
    Score(ScoreArgs),
    /// Show results for the assessment stored on disk
    Results(ResultsArgs),
    /// Walk a sample respondent through the assessment end to end
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questions => run_questions(),
        Command::Score(args) => run_score(args),
        Command::Results(args) => run_results(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["career-fit-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_exactly_one_answer_source() {
        let cli = Cli::try_parse_from(["career-fit-api", "score", "--answers", "answers.json"])
            .expect("parses");
        assert!(matches!(cli.command, Some(Command::Score(_))));

        let both = Cli::try_parse_from([
            "career-fit-api",
            "score",
            "--answers",
            "answers.json",
            "--answers-csv",
            "answers.csv",
        ]);
        assert!(both.is_err());

        let neither = Cli::try_parse_from(["career-fit-api", "score"]);
        assert!(neither.is_err());
    }

    #[test]
    fn score_rejects_malformed_completion_time() {
        let parsed = Cli::try_parse_from([
            "career-fit-api",
            "score",
            "--answers",
            "answers.json",
            "--completed-at",
            "last tuesday",
        ]);
        assert!(parsed.is_err());
    }
}

use clap::{Args, Parser, Subcommand};
use lectern_model::quiz::Answer;
use lectern_utils::args::db::Db;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "lectern", about = "Enrollment, progress and quiz grading")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long = "sentry-dsn", env = "SENTRY_DSN", global = true, help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(
        long,
        env = "LECTERN_ENV",
        global = true,
        default_value = "dev",
        help = "Set the environment used by sentry"
    )]
    pub(crate) env: String,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Create the database schema
    Migrate(Migrate),
    /// Enroll a student in a course
    Enroll(Enroll),
    /// Mark a lesson as completed
    CompleteLesson(CompleteLesson),
    /// Grade and store a quiz attempt
    SubmitQuiz(SubmitQuiz),
    /// Print the JSON schema of the config file
    ConfigSchema,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Learner {
    #[command(flatten)]
    pub(crate) db: Db,

    #[arg(long, env = "LECTERN_CONFIG", help = "Path of the yaml config")]
    pub(crate) config: Option<PathBuf>,

    #[arg(long = "user", help = "Id of the acting user")]
    pub(crate) user_id: Uuid,
}

#[derive(Debug, Parser)]
pub(crate) struct Migrate {
    #[command(flatten)]
    pub(crate) db: Db,
}

#[derive(Debug, Parser)]
pub(crate) struct Enroll {
    #[command(flatten)]
    pub(crate) learner: Learner,

    #[arg(long = "course")]
    pub(crate) course_id: Uuid,
}

#[derive(Debug, Parser)]
pub(crate) struct CompleteLesson {
    #[command(flatten)]
    pub(crate) learner: Learner,

    #[arg(long = "course")]
    pub(crate) course_id: Uuid,

    #[arg(long = "lesson")]
    pub(crate) lesson_id: Uuid,
}

#[derive(Debug, Parser)]
pub(crate) struct SubmitQuiz {
    #[command(flatten)]
    pub(crate) learner: Learner,

    #[arg(long = "quiz")]
    pub(crate) quiz_id: Uuid,

    #[arg(
        long = "answer",
        value_parser = parse_answer,
        help = "Answer as <question-id>=<option index>, leave the index empty to skip a question"
    )]
    pub(crate) answers: Vec<Answer>,
}

fn parse_answer(value: &str) -> Result<Answer, String> {
    let (question_id, selected) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <question-id>=<option>, got {value:?}"))?;
    let question_id = question_id.parse::<Uuid>().map_err(|error| error.to_string())?;
    let selected_option = match selected.trim() {
        "" => None,
        selected => Some(selected.parse::<u32>().map_err(|error| error.to_string())?),
    };
    Ok(Answer {
        question_id,
        selected_option,
    })
}

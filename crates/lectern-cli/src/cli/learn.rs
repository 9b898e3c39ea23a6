use crate::cli::{connect, load_config};
use crate::opt::{CompleteLesson, Enroll, Learner, SubmitQuiz};
use anyhow::{Error, anyhow};
use lectern_config::LecternConfig;
use lectern_core::{LearningError, LoadActor};
use lectern_model::actor::Actor;
use lectern_model::enrollment::EnrollmentState;
use lectern_model::quiz::QuizAttemptResult;
use sea_orm::DatabaseConnection;

struct Session {
    conn: DatabaseConnection,
    config: LecternConfig,
    actor: Actor,
}

async fn session(learner: &Learner) -> Result<Session, Error> {
    let config = load_config(learner.config.as_deref()).await?;
    let conn = connect(&learner.db).await?;
    let actor = Actor::load(&conn, learner.user_id).await.map_err(report)?;
    Ok(Session { conn, config, actor })
}

/// Prints the user facing part of the error to stderr.
fn report(error: LearningError) -> Error {
    match error.error_data() {
        Some(data) => match serde_json::to_string(&data) {
            Ok(json) => eprintln!("{json}"),
            Err(error) => tracing::warn!(%error, "failed to serialize error data"),
        },
        None => tracing::error!(error = &error as &dyn std::error::Error, "request failed"),
    }
    anyhow!(error)
}

pub(crate) async fn enroll(opt: Enroll) -> Result<EnrollmentState, Error> {
    let Session { conn, config, actor } = session(&opt.learner).await?;
    lectern_core::enrollment::enroll(&conn, &config, &actor, opt.course_id)
        .await
        .map_err(report)
}

pub(crate) async fn complete_lesson(opt: CompleteLesson) -> Result<EnrollmentState, Error> {
    let Session { conn, config, actor } = session(&opt.learner).await?;
    lectern_core::progress::record_lesson_completion(&conn, &config, &actor, opt.course_id, opt.lesson_id)
        .await
        .map_err(report)
}

pub(crate) async fn submit_quiz(opt: SubmitQuiz) -> Result<QuizAttemptResult, Error> {
    let Session { conn, config, actor } = session(&opt.learner).await?;
    lectern_core::grading::submit_quiz_attempt(&conn, &config, &actor, opt.quiz_id, &opt.answers)
        .await
        .map_err(report)
}

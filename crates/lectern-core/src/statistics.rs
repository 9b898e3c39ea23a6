use crate::actor::require_owner;
use crate::error::LearningError;
use lectern_db::course;
use lectern_db::quiz::{attempt, quiz};
use lectern_db::util::RequireRecord;
use lectern_model::actor::{Actor, Capability};
use lectern_model::quiz::{AttemptSummary, QuizStatistics};
use lectern_model_tools::convert::TryIntoModel;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

/// Attempt numbers of a quiz for the instructor of its course.
pub async fn quiz_statistics<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    quiz_id: Uuid,
) -> Result<QuizStatistics, LearningError> {
    let quiz = quiz::Query::find_by_id(conn, quiz_id)
        .await?
        .ok_or_else(|| LearningError::not_found("quiz", quiz_id))?;
    let course = course::Query::find_by_id(conn, quiz.course_id).await.require("course")?;
    require_owner(actor, Capability::ViewCourseStatistics, &course)?;

    let stats = attempt::Query::statistics(conn, quiz_id).await?;
    #[allow(clippy::cast_precision_loss)]
    let pass_rate = (stats.attempts > 0).then(|| stats.passed as f64 * 100.0 / stats.attempts as f64);

    Ok(QuizStatistics {
        quiz_id,
        attempts: stats.attempts,
        passed: stats.passed,
        average_percentage: stats.average_percentage,
        pass_rate,
    })
}

/// The actor's own attempts, newest first.
pub async fn attempt_history<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    quiz_id: Uuid,
) -> Result<Vec<AttemptSummary>, LearningError> {
    actor.require(Capability::SubmitQuiz)?;
    quiz::Query::find_by_id(conn, quiz_id)
        .await?
        .ok_or_else(|| LearningError::not_found("quiz", quiz_id))?;

    attempt::Query::list_for_student(conn, quiz_id, actor.user_id)
        .await?
        .into_iter()
        .map(TryIntoModel::<AttemptSummary>::try_into_model)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

use chrono::Utc;
use lectern_entity::quiz::attempt::{ActiveModel, Entity as AttemptEntity, Model as Attempt};
use lectern_entity::quiz::attempt_answer::{self, Entity as AttemptAnswerEntity};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

/// A graded attempt ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttempt {
    pub quiz_id: Uuid,
    pub student_id: Uuid,
    pub attempt_number: i32,
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAttemptAnswer {
    pub question_id: Uuid,
    pub selected_option: Option<i32>,
    pub correct: bool,
    pub points_awarded: i32,
}

pub struct Mutation;

impl Mutation {
    /// Stores the attempt together with its answers.
    ///
    /// Callers are expected to pass a transaction so that the attempt and its answers are written together.
    pub async fn insert_graded<C: ConnectionTrait>(
        conn: &C,
        attempt: NewAttempt,
        answers: Vec<NewAttemptAnswer>,
    ) -> Result<Attempt, DbErr> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            quiz_id: Set(attempt.quiz_id),
            student_id: Set(attempt.student_id),
            attempt_number: Set(attempt.attempt_number),
            score: Set(attempt.score),
            max_score: Set(attempt.max_score),
            percentage: Set(attempt.percentage),
            passed: Set(attempt.passed),
            submitted_at: Set(Utc::now().naive_utc()),
        };
        let stored = AttemptEntity::insert(model).exec_with_returning(conn).await?;

        if answers.is_empty() {
            return Ok(stored);
        }

        let rows = answers.into_iter().map(|answer| attempt_answer::ActiveModel {
            attempt_id: Set(stored.id),
            question_id: Set(answer.question_id),
            selected_option: Set(answer.selected_option),
            correct: Set(answer.correct),
            points_awarded: Set(answer.points_awarded),
        });
        AttemptAnswerEntity::insert_many(rows).exec(conn).await?;

        tracing::debug!(attempt_id = %stored.id, number = stored.attempt_number, "stored graded attempt");
        Ok(stored)
    }
}

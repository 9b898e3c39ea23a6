use lectern_entity::quiz::attempt::{self, Entity as AttemptEntity, Model as Attempt};
use lectern_entity::quiz::attempt_answer::{self, Entity as AttemptAnswerEntity, Model as AttemptAnswer};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

/// Aggregated attempt numbers of a quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptStatistics {
    pub attempts: u64,
    pub passed: u64,
    pub average_percentage: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct AverageRow {
    average: Option<f64>,
}

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, attempt_id: Uuid) -> Result<Option<Attempt>, DbErr> {
        AttemptEntity::find_by_id(attempt_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %attempt_id, "failed to load attempt");
        })
    }

    pub async fn count_for_student<C: ConnectionTrait>(conn: &C, quiz_id: Uuid, student_id: Uuid) -> Result<u64, DbErr> {
        AttemptEntity::find()
            .filter(attempt::Column::QuizId.eq(quiz_id))
            .filter(attempt::Column::StudentId.eq(student_id))
            .count(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %quiz_id, %student_id, "failed to count attempts");
            })
    }

    /// The attempts of a student, newest first.
    pub async fn list_for_student<C: ConnectionTrait>(
        conn: &C,
        quiz_id: Uuid,
        student_id: Uuid,
    ) -> Result<Vec<Attempt>, DbErr> {
        AttemptEntity::find()
            .filter(attempt::Column::QuizId.eq(quiz_id))
            .filter(attempt::Column::StudentId.eq(student_id))
            .order_by_desc(attempt::Column::AttemptNumber)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %quiz_id, %student_id, "failed to load attempts");
            })
    }

    pub async fn answers_for_attempt<C: ConnectionTrait>(
        conn: &C,
        attempt_id: Uuid,
    ) -> Result<Vec<AttemptAnswer>, DbErr> {
        AttemptAnswerEntity::find()
            .filter(attempt_answer::Column::AttemptId.eq(attempt_id))
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %attempt_id, "failed to load attempt answers");
            })
    }

    pub async fn statistics<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<AttemptStatistics, DbErr> {
        let attempts = AttemptEntity::find()
            .filter(attempt::Column::QuizId.eq(quiz_id))
            .count(conn)
            .await?;
        let passed = AttemptEntity::find()
            .filter(attempt::Column::QuizId.eq(quiz_id))
            .filter(attempt::Column::Passed.eq(true))
            .count(conn)
            .await?;
        let average = AttemptEntity::find()
            .select_only()
            .column_as(Expr::expr(Func::avg(Expr::col(attempt::Column::Percentage))), "average")
            .filter(attempt::Column::QuizId.eq(quiz_id))
            .into_model::<AverageRow>()
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %quiz_id, "failed to aggregate attempts");
            })?;

        Ok(AttemptStatistics {
            attempts,
            passed,
            average_percentage: average.and_then(|row| row.average),
        })
    }
}

use lectern_entity::lesson_completion::{self, Entity as LessonCompletionEntity};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn count_for_enrollment<C: ConnectionTrait>(conn: &C, enrollment_id: Uuid) -> Result<u64, DbErr> {
        LessonCompletionEntity::find()
            .filter(lesson_completion::Column::EnrollmentId.eq(enrollment_id))
            .count(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %enrollment_id, "failed to count completed lessons");
            })
    }

    pub async fn completed_lessons<C: ConnectionTrait>(conn: &C, enrollment_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let completions = LessonCompletionEntity::find()
            .filter(lesson_completion::Column::EnrollmentId.eq(enrollment_id))
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %enrollment_id, "failed to load completed lessons");
            })?;

        Ok(completions.into_iter().map(|c| c.lesson_id).collect())
    }
}

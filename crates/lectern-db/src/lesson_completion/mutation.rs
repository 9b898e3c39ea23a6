use chrono::Utc;
use lectern_entity::lesson_completion::{self, ActiveModel, Entity as LessonCompletionEntity};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, ConnectionTrait, DbErr, EntityTrait, TryInsertResult};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Marks the lesson as completed. Returns `false` if it already was.
    pub async fn mark_completed<C: ConnectionTrait>(
        conn: &C,
        enrollment_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<bool, DbErr> {
        let completion = ActiveModel {
            enrollment_id: ActiveValue::Set(enrollment_id),
            lesson_id: ActiveValue::Set(lesson_id),
            completed_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        let mut on_conflict =
            OnConflict::columns([lesson_completion::Column::EnrollmentId, lesson_completion::Column::LessonId]);
        on_conflict.do_nothing();

        let res = LessonCompletionEntity::insert(completion)
            .on_conflict(on_conflict)
            .do_nothing()
            .exec(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %enrollment_id, %lesson_id, "failed to mark lesson completed");
            })?;

        match res {
            TryInsertResult::Inserted(_) => Ok(true),
            TryInsertResult::Conflicted => Ok(false),
            TryInsertResult::Empty => Err(DbErr::RecordNotInserted),
        }
    }
}

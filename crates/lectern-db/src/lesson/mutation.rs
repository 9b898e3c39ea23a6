use crate::lesson::Query;
use crate::util::FlattenTransactionResultExt;
use chrono::Utc;
use lectern_entity::lesson::{ActiveModel, Entity as LessonEntity, Model as Lesson};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, TransactionTrait};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Appends a lesson after the current last position of the course.
    pub async fn append<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        course_id: Uuid,
        title: String,
        content_url: Option<String>,
    ) -> Result<Lesson, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let position = Query::last_position(txn, course_id).await?.map_or(1, |last| last + 1);
                tracing::trace!(%course_id, position, "appending lesson");

                let lesson = ActiveModel {
                    id: Set(Uuid::new_v4()),
                    course_id: Set(course_id),
                    title: Set(title),
                    position: Set(position),
                    content_url: Set(content_url),
                    created_at: Set(Utc::now().naive_utc()),
                };
                LessonEntity::insert(lesson).exec_with_returning(txn).await
            })
        })
        .await
        .flatten_res()
    }
}

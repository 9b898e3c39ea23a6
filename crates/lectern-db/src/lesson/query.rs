use lectern_entity::lesson::{self, Entity as LessonEntity, Model as Lesson};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, lesson_id: Uuid) -> Result<Option<Lesson>, DbErr> {
        LessonEntity::find_by_id(lesson_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %lesson_id, "failed to load lesson");
        })
    }

    pub async fn list_for_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Vec<Lesson>, DbErr> {
        LessonEntity::find()
            .filter(lesson::Column::CourseId.eq(course_id))
            .order_by_asc(lesson::Column::Position)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, "failed to load lessons");
            })
    }

    pub async fn count_for_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<u64, DbErr> {
        LessonEntity::find()
            .filter(lesson::Column::CourseId.eq(course_id))
            .count(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, "failed to count lessons");
            })
    }

    pub async fn last_position<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Option<i32>, DbErr> {
        let last = LessonEntity::find()
            .filter(lesson::Column::CourseId.eq(course_id))
            .order_by_desc(lesson::Column::Position)
            .one(conn)
            .await?;
        Ok(last.map(|lesson| lesson.position))
    }
}

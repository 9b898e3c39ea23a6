use lectern_entity::quiz::quiz::{self, Entity as QuizEntity, Model as Quiz};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<Option<Quiz>, DbErr> {
        QuizEntity::find_by_id(quiz_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, "failed to load quiz by id");
        })
    }

    pub async fn list_for_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Vec<Quiz>, DbErr> {
        QuizEntity::find()
            .filter(quiz::Column::CourseId.eq(course_id))
            .order_by_asc(quiz::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, "failed to load quizzes by course");
            })
    }

    pub async fn list_for_lesson<C: ConnectionTrait>(conn: &C, lesson_id: Uuid) -> Result<Vec<Quiz>, DbErr> {
        QuizEntity::find()
            .filter(quiz::Column::LessonId.eq(lesson_id))
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %lesson_id, "failed to load quizzes by lesson");
            })
    }
}

use chrono::Utc;
use lectern_entity::quiz::quiz::{ActiveModel, Entity as QuizEntity, Model as Quiz};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub course_id: Uuid,
    pub lesson_id: Option<Uuid>,
    pub title: String,
    pub passing_score: i16,
    pub max_attempts: Option<i32>,
}

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(conn: &C, new_quiz: NewQuiz) -> Result<Quiz, DbErr> {
        let course_id = new_quiz.course_id;
        let quiz = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(new_quiz.course_id),
            lesson_id: Set(new_quiz.lesson_id),
            title: Set(new_quiz.title),
            passing_score: Set(new_quiz.passing_score),
            max_attempts: Set(new_quiz.max_attempts),
            published: Set(false),
            created_at: Set(Utc::now().naive_utc()),
        };

        QuizEntity::insert(quiz)
            .exec_with_returning(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %course_id, "failed to create quiz"))
    }

    pub async fn set_published<C: ConnectionTrait>(conn: &C, quiz_id: Uuid, published: bool) -> Result<Quiz, DbErr> {
        ActiveModel {
            id: Unchanged(quiz_id),
            published: Set(published),
            ..Default::default()
        }
        .update(conn)
        .await
    }
}

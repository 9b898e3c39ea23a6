use lectern_entity::quiz::question::{self, Entity as QuestionEntity, Model as Question};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn list_for_quiz<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<Vec<Question>, DbErr> {
        QuestionEntity::find()
            .filter(question::Column::QuizId.eq(quiz_id))
            .order_by_asc(question::Column::Position)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %quiz_id, "failed to load questions");
            })
    }

    pub async fn last_position<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<Option<i32>, DbErr> {
        let last = QuestionEntity::find()
            .filter(question::Column::QuizId.eq(quiz_id))
            .order_by_desc(question::Column::Position)
            .one(conn)
            .await?;
        Ok(last.map(|question| question.position))
    }
}

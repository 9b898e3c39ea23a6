use crate::quiz::question::Query;
use crate::util::FlattenTransactionResultExt;
use lectern_entity::quiz::question::{ActiveModel, Entity as QuestionEntity, Model as Question};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, TransactionTrait};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub points: i32,
    pub explanation: Option<String>,
}

pub struct Mutation;

impl Mutation {
    /// Appends the question after the last question of the quiz.
    pub async fn append<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: Uuid,
        new_question: NewQuestion,
    ) -> Result<Question, DbErr> {
        let options = serde_json::to_string(&new_question.options).map_err(|error| DbErr::Json(error.to_string()))?;

        conn.transaction(|txn| {
            Box::pin(async move {
                let position = Query::last_position(txn, quiz_id).await?.map_or(1, |last| last + 1);
                tracing::trace!(%quiz_id, position, "appending question");

                let question = ActiveModel {
                    id: Set(Uuid::new_v4()),
                    quiz_id: Set(quiz_id),
                    position: Set(position),
                    text: Set(new_question.text),
                    options: Set(options),
                    correct_option: Set(new_question.correct_option),
                    points: Set(new_question.points),
                    explanation: Set(new_question.explanation),
                };
                QuestionEntity::insert(question).exec_with_returning(txn).await
            })
        })
        .await
        .flatten_res()
    }
}

use chrono::Utc;
use lectern_entity::review::{ActiveModel, Entity as ReviewEntity, Model as Review};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub verified: bool,
}

pub struct Mutation;

impl Mutation {
    /// Inserts the review. A second review of the same student fails with a unique constraint violation.
    pub async fn create<C: ConnectionTrait>(conn: &C, review: NewReview) -> Result<Review, DbErr> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(review.course_id),
            student_id: Set(review.student_id),
            rating: Set(review.rating),
            comment: Set(review.comment),
            verified: Set(review.verified),
            created_at: Set(Utc::now().naive_utc()),
        };
        ReviewEntity::insert(model).exec_with_returning(conn).await
    }
}

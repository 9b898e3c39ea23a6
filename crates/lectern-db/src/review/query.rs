use lectern_entity::review::{self, Entity as ReviewEntity, Model as Review};
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: i64,
}

impl Query {
    pub async fn find_for_student<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<Review>, DbErr> {
        ReviewEntity::find()
            .filter(review::Column::CourseId.eq(course_id))
            .filter(review::Column::StudentId.eq(student_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, %student_id, "failed to load review");
            })
    }

    pub async fn list_for_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Vec<Review>, DbErr> {
        ReviewEntity::find()
            .filter(review::Column::CourseId.eq(course_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, "failed to load reviews");
            })
    }

    pub async fn rating_summary<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<RatingSummary, DbErr> {
        let summary = ReviewEntity::find()
            .select_only()
            .column_as(
                Expr::expr(Func::avg(
                    Expr::col(review::Column::Rating).cast_as(Alias::new("double precision")),
                )),
                "average",
            )
            .column_as(Expr::col(review::Column::Id).count(), "count")
            .filter(review::Column::CourseId.eq(course_id))
            .into_model::<RatingSummary>()
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, "failed to aggregate ratings");
            })?;

        Ok(summary.unwrap_or(RatingSummary { average: None, count: 0 }))
    }
}

use lectern_entity::enrollment::{self, Entity as EnrollmentEntity, Model as Enrollment, Status};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct StatusCount {
    pub status: Status,
    pub count: i64,
}

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, enrollment_id: Uuid) -> Result<Option<Enrollment>, DbErr> {
        EnrollmentEntity::find_by_id(enrollment_id)
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %enrollment_id, "failed to load enrollment");
            })
    }

    pub async fn find_for_student<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, DbErr> {
        EnrollmentEntity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %student_id, %course_id, "failed to load enrollment");
            })
    }

    pub async fn list_for_student<C: ConnectionTrait>(conn: &C, student_id: Uuid) -> Result<Vec<Enrollment>, DbErr> {
        EnrollmentEntity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %student_id, "failed to load enrollments");
            })
    }

    pub async fn status_counts<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Vec<StatusCount>, DbErr> {
        EnrollmentEntity::find()
            .select_only()
            .column(enrollment::Column::Status)
            .column_as(Expr::col(enrollment::Column::Id).count(), "count")
            .filter(enrollment::Column::CourseId.eq(course_id))
            .group_by(enrollment::Column::Status)
            .into_model::<StatusCount>()
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, "failed to count enrollments");
            })
    }
}

use lectern_entity::course::{self, Entity as CourseEntity, Model as Course, Status};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Option<Course>, DbErr> {
        CourseEntity::find_by_id(course_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %course_id, "failed to load course");
        })
    }

    pub async fn find_by_slug<C: ConnectionTrait>(conn: &C, slug: &str) -> Result<Option<Course>, DbErr> {
        CourseEntity::find()
            .filter(course::Column::Slug.eq(slug))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %slug, "failed to load course by slug");
            })
    }

    pub async fn list_for_instructor<C: ConnectionTrait>(conn: &C, instructor_id: Uuid) -> Result<Vec<Course>, DbErr> {
        CourseEntity::find()
            .filter(course::Column::InstructorId.eq(instructor_id))
            .order_by_desc(course::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %instructor_id, "failed to load instructor courses");
            })
    }

    pub async fn list_published<C: ConnectionTrait>(conn: &C) -> Result<Vec<Course>, DbErr> {
        CourseEntity::find()
            .filter(course::Column::Status.eq(Status::Published))
            .order_by_desc(course::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load published courses");
            })
    }
}

use chrono::Utc;
use lectern_entity::course::{ActiveModel, Entity as CourseEntity, Model as Course, Status};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        instructor_id: Uuid,
        title: String,
        slug: String,
        description: String,
    ) -> Result<Course, DbErr> {
        let course = ActiveModel {
            id: Set(Uuid::new_v4()),
            instructor_id: Set(instructor_id),
            title: Set(title),
            slug: Set(slug),
            description: Set(description),
            status: Set(Status::Draft),
            created_at: Set(Utc::now().naive_utc()),
        };

        CourseEntity::insert(course)
            .exec_with_returning(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %instructor_id, "failed to create course");
            })
    }

    pub async fn set_status<C: ConnectionTrait>(conn: &C, course_id: Uuid, status: Status) -> Result<Course, DbErr> {
        tracing::debug!(%course_id, ?status, "updating course status");
        ActiveModel {
            id: Unchanged(course_id),
            status: Set(status),
            ..Default::default()
        }
        .update(conn)
        .await
    }
}

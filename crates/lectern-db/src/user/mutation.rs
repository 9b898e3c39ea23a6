use chrono::Utc;
use lectern_entity::user::{ActiveModel, Entity, Model, Role};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_user<C: ConnectionTrait>(
        conn: &C,
        display_name: String,
        email: String,
        role: Role,
    ) -> Result<Model, DbErr> {
        let new_user = ActiveModel {
            id: Set(Uuid::new_v4()),
            display_name: Set(display_name),
            email: Set(email),
            role: Set(role),
            created_at: Set(Utc::now().naive_utc()),
        };

        Entity::insert(new_user)
            .exec_with_returning(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to create user"))
    }

    pub async fn update_display_name<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        display_name: String,
    ) -> Result<Model, DbErr> {
        let user = ActiveModel {
            id: Unchanged(user_id),
            display_name: Set(display_name),
            ..Default::default()
        };
        user.update(conn).await
    }
}

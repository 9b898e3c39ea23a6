use crate::error::{Forbidden, LearningError};
use lectern_db::user;
use lectern_entity::course::Model as Course;
use lectern_model::actor::{Actor, Capability};
use lectern_model_tools::convert::IntoModel;
use sea_orm::ConnectionTrait;
use std::future::Future;
use uuid::Uuid;

pub trait LoadActor: Sized {
    /// Builds the actor from the stored user.
    fn load<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> impl Future<Output = Result<Self, LearningError>> + Send;
}

impl LoadActor for Actor {
    async fn load<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Self, LearningError> {
        let user = user::Query::find_user_by_id(conn, user_id)
            .await?
            .ok_or_else(|| LearningError::not_found("user", user_id))?;
        Ok(Self::new(user.id, user.role.into_model()))
    }
}

/// Checks the capability and that the actor is the instructor of the course.
pub(crate) fn require_owner(actor: &Actor, capability: Capability, course: &Course) -> Result<(), LearningError> {
    actor.require(capability)?;
    if course.instructor_id != actor.user_id {
        return Err(Forbidden::NotCourseOwner(course.id).into());
    }
    Ok(())
}

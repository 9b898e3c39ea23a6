use crate::error::{LearningError, ValidationError};
use lectern_config::LecternConfig;
use lectern_db::review::{self, NewReview};
use lectern_db::util::is_unique_violation;
use lectern_db::{course, enrollment};
use lectern_entity::enrollment::Status;
use lectern_model::actor::{Actor, Capability};
use lectern_model::review::{CourseRating, Review};
use lectern_model_tools::convert::TryIntoModel;
use sea_orm::ConnectionTrait;
use tracing::instrument;
use uuid::Uuid;

/// Stores the actor's review of a course they are enrolled in.
///
/// The review is marked as verified if the enrollment is completed.
#[instrument(skip(conn, config, actor, comment), fields(user_id = %actor.user_id))]
pub async fn submit_review<C: ConnectionTrait>(
    conn: &C,
    config: &LecternConfig,
    actor: &Actor,
    course_id: Uuid,
    rating: u8,
    comment: String,
) -> Result<Review, LearningError> {
    actor.require(Capability::Review)?;
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::InvalidRating(rating).into());
    }

    let enrollment = enrollment::Query::find_for_student(conn, actor.user_id, course_id)
        .await?
        .filter(|enrollment| enrollment.status.is_active())
        .ok_or(LearningError::NotEnrolled { course_id })?;
    let completed = enrollment.status == Status::Completed;
    if config.reviews().require_completion && !completed {
        return Err(ValidationError::CourseNotCompleted.into());
    }

    let review = review::Mutation::create(
        conn,
        NewReview {
            course_id,
            student_id: actor.user_id,
            rating: i16::from(rating),
            comment,
            verified: completed,
        },
    )
    .await
    .map_err(|error| {
        if is_unique_violation(&error) {
            LearningError::DuplicateReview { course_id }
        } else {
            tracing::error!(error = &error as &dyn std::error::Error, %course_id, "failed to store review");
            error.into()
        }
    })?;

    tracing::debug!(review_id = %review.id, rating, verified = completed, "stored review");
    Ok(review.try_into_model()?)
}

/// Average rating and number of reviews of a course.
pub async fn course_rating<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<CourseRating, LearningError> {
    course::Query::find_by_id(conn, course_id)
        .await?
        .ok_or_else(|| LearningError::not_found("course", course_id))?;

    let summary = review::Query::rating_summary(conn, course_id).await?;
    Ok(CourseRating {
        course_id,
        average: summary.average,
        count: u64::try_from(summary.count).unwrap_or_default(),
    })
}

/// Reviews of a course, newest first.
pub async fn course_reviews<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Vec<Review>, LearningError> {
    review::Query::list_for_course(conn, course_id)
        .await?
        .into_iter()
        .map(TryIntoModel::<Review>::try_into_model)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

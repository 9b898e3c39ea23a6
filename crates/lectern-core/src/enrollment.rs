use crate::actor::require_owner;
use crate::error::{LearningError, ValidationError};
use crate::progress::state_of;
use crate::retry::Retry;
use lectern_config::LecternConfig;
use lectern_db::util::{RequireRecord, is_lock_contention};
use lectern_db::{course, enrollment, lesson_completion};
use lectern_entity::course::Status as CourseStatus;
use lectern_entity::enrollment::{Model as Enrollment, Status};
use lectern_model::actor::{Actor, Capability};
use lectern_model::enrollment::{CourseProgressSummary, EnrollmentState};
use lectern_model_tools::convert::IntoModel;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

/// Applies a version checked status change, re-reading the enrollment when another request got there first.
async fn change_status<C, F>(
    conn: &C,
    config: &LecternConfig,
    mut enrollment: Enrollment,
    next_status: F,
) -> Result<Enrollment, LearningError>
where
    C: ConnectionTrait,
    F: Fn(&Enrollment) -> Result<Option<Status>, LearningError>,
{
    let mut retry = Retry::new(config);
    loop {
        let Some(status) = next_status(&enrollment)? else {
            return Ok(enrollment);
        };
        match enrollment::Mutation::set_status(conn, enrollment.id, enrollment.version, status).await {
            Ok(true) => {
                return Ok(enrollment::Query::find_by_id(conn, enrollment.id)
                    .await
                    .require("enrollment")?);
            }
            Ok(false) => {}
            Err(error) if is_lock_contention(&error) => {}
            Err(error) => return Err(error.into()),
        }

        tracing::debug!(enrollment_id = %enrollment.id, retries = retry.retries(), "enrollment changed concurrently");
        retry.lost().await?;
        enrollment = enrollment::Query::find_by_id(conn, enrollment.id)
            .await
            .require("enrollment")?;
    }
}

/// Enrolls the actor in a published course.
///
/// Enrolling twice returns the existing enrollment. A dropped enrollment is reactivated and keeps its progress, it
/// is in progress again as soon as any lesson was completed.
#[instrument(skip(conn, config, actor), fields(user_id = %actor.user_id))]
pub async fn enroll<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    config: &LecternConfig,
    actor: &Actor,
    course_id: Uuid,
) -> Result<EnrollmentState, LearningError> {
    actor.require(Capability::Enroll)?;

    course::Query::find_by_id(conn, course_id)
        .await?
        .filter(|course| course.status == CourseStatus::Published)
        .ok_or_else(|| LearningError::not_found("course", course_id))?;

    let existing = enrollment::Mutation::get_or_create(conn, actor.user_id, course_id).await?;
    let completed = lesson_completion::Query::count_for_enrollment(conn, existing.id).await?;
    let enrollment = change_status(conn, config, existing, |enrollment| {
        Ok((enrollment.status == Status::Dropped).then(|| {
            if completed > 0 || enrollment.progress > 0 {
                Status::InProgress
            } else {
                Status::Active
            }
        }))
    })
    .await?;

    tracing::debug!(enrollment_id = %enrollment.id, status = ?enrollment.status, "enrolled");
    state_of(conn, enrollment).await
}

/// Drops the enrollment of the actor. Completed enrollments cannot be dropped.
#[instrument(skip(conn, config, actor), fields(user_id = %actor.user_id))]
pub async fn drop_enrollment<C: ConnectionTrait>(
    conn: &C,
    config: &LecternConfig,
    actor: &Actor,
    course_id: Uuid,
) -> Result<EnrollmentState, LearningError> {
    actor.require(Capability::Enroll)?;

    let enrollment = enrollment::Query::find_for_student(conn, actor.user_id, course_id)
        .await?
        .filter(|enrollment| enrollment.status.is_active())
        .ok_or(LearningError::NotEnrolled { course_id })?;

    let enrollment = change_status(conn, config, enrollment, |enrollment| match enrollment.status {
        Status::Completed => Err(ValidationError::EnrollmentCompleted.into()),
        Status::Dropped => Ok(None),
        Status::Active | Status::InProgress => Ok(Some(Status::Dropped)),
    })
    .await?;

    tracing::debug!(enrollment_id = %enrollment.id, "dropped enrollment");
    state_of(conn, enrollment).await
}

/// The enrollment of the actor, including dropped ones.
pub async fn enrollment_state<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    course_id: Uuid,
) -> Result<EnrollmentState, LearningError> {
    let enrollment = enrollment::Query::find_for_student(conn, actor.user_id, course_id)
        .await?
        .ok_or(LearningError::NotEnrolled { course_id })?;
    state_of(conn, enrollment).await
}

/// Counts the enrollments of a course per status. Only the instructor of the course may see them.
pub async fn course_progress_summary<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    course_id: Uuid,
) -> Result<CourseProgressSummary, LearningError> {
    let course = course::Query::find_by_id(conn, course_id)
        .await?
        .ok_or_else(|| LearningError::not_found("course", course_id))?;
    require_owner(actor, Capability::ViewCourseStatistics, &course)?;

    let mut summary = CourseProgressSummary {
        course_id,
        ..Default::default()
    };
    for count in enrollment::Query::status_counts(conn, course_id).await? {
        summary.add(count.status.into_model(), u64::try_from(count.count).unwrap_or_default());
    }
    Ok(summary)
}

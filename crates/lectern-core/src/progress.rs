//! Enrollment progress tracking.
//!
//! Progress is the share of distinct completed lessons in percent. It never decreases and the
//! enrollment status only moves forward (`active` -> `in_progress` -> `completed`).

use crate::error::{LearningError, ValidationError};
use crate::retry::{Retry, Round};
use chrono::{NaiveDateTime, Utc};
use lectern_config::LecternConfig;
use lectern_db::enrollment::{self, ProgressChange};
use lectern_db::util::{RequireRecord, is_lock_contention};
use lectern_db::{lesson, lesson_completion};
use lectern_entity::enrollment::Model as Enrollment;
use lectern_model::actor::{Actor, Capability};
use lectern_model::enrollment::{EnrollmentState, EnrollmentStatus};
use lectern_model_tools::convert::enrollment::LessonCounts;
use lectern_model_tools::convert::{FromDbModel, IntoDbModel, TryIntoModel};
use lectern_model_tools::error::Error as ConversionError;
use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

/// Completed share of `total` in percent, rounded down. A course without lessons has no progress.
#[must_use]
pub fn completion_percentage(completed: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percentage = completed.min(total).saturating_mul(100) / total;
    u8::try_from(percentage).unwrap_or(100)
}

const fn rank(status: EnrollmentStatus) -> u8 {
    match status {
        EnrollmentStatus::Active => 0,
        EnrollmentStatus::InProgress => 1,
        EnrollmentStatus::Completed => 2,
        EnrollmentStatus::Dropped => 3,
    }
}

/// The progress related part of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub progress: u8,
    pub status: EnrollmentStatus,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub snapshot: ProgressSnapshot,
    pub changed: bool,
    /// The enrollment reached 100% with this update.
    pub completed_now: bool,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn advance(self, completed: u64, total: u64, now: NaiveDateTime) -> ProgressUpdate {
        if self.status == EnrollmentStatus::Dropped {
            return ProgressUpdate {
                snapshot: self,
                changed: false,
                completed_now: false,
            };
        }

        let progress = self.progress.max(completion_percentage(completed, total));
        let reached = if progress >= 100 {
            EnrollmentStatus::Completed
        } else if completed > 0 || progress > 0 {
            EnrollmentStatus::InProgress
        } else {
            EnrollmentStatus::Active
        };
        let status = if rank(reached) > rank(self.status) { reached } else { self.status };
        let completed_at = match status {
            EnrollmentStatus::Completed => self.completed_at.or(Some(now)),
            _ => self.completed_at,
        };

        let snapshot = Self {
            progress,
            status,
            completed_at,
        };
        ProgressUpdate {
            snapshot,
            changed: snapshot != self,
            completed_now: status == EnrollmentStatus::Completed && self.status != EnrollmentStatus::Completed,
        }
    }
}

impl TryFrom<&Enrollment> for ProgressSnapshot {
    type Error = ConversionError;

    fn try_from(enrollment: &Enrollment) -> Result<Self, Self::Error> {
        Ok(Self {
            progress: u8::try_from(enrollment.progress).map_err(|_| ConversionError::NumConversion)?,
            status: EnrollmentStatus::from_db_model(enrollment.status),
            completed_at: enrollment.completed_at,
        })
    }
}

/// Counts the lessons of the enrollment and builds its state.
pub(crate) async fn state_of<C: ConnectionTrait>(
    conn: &C,
    enrollment: Enrollment,
) -> Result<EnrollmentState, LearningError> {
    let counts = LessonCounts {
        completed: lesson_completion::Query::count_for_enrollment(conn, enrollment.id).await?,
        total: lesson::Query::count_for_course(conn, enrollment.course_id).await?,
    };
    Ok((enrollment, counts).try_into_model()?)
}

/// One transaction round of `record_lesson_completion`. Returns the new state and whether the course was
/// completed with it.
async fn completion_round(
    txn: &DatabaseTransaction,
    course_id: Uuid,
    enrollment_id: Uuid,
    lesson_id: Uuid,
) -> Result<Round<(EnrollmentState, bool)>, LearningError> {
    // Has to stay the first statement: SQLite only waits for a busy write lock while the transaction holds no
    // read lock yet.
    let inserted = lesson_completion::Mutation::mark_completed(txn, enrollment_id, lesson_id).await?;
    let enrollment = enrollment::Query::find_by_id(txn, enrollment_id)
        .await?
        .filter(|enrollment| enrollment.status.is_active())
        .ok_or(LearningError::NotEnrolled { course_id })?;

    let completed = lesson_completion::Query::count_for_enrollment(txn, enrollment.id).await?;
    let total = lesson::Query::count_for_course(txn, course_id).await?;

    let update = ProgressSnapshot::try_from(&enrollment)?.advance(completed, total, Utc::now().naive_utc());
    if !inserted && !update.changed {
        tracing::debug!(%lesson_id, "lesson was already completed");
        return Ok(Round::Done((state_of(txn, enrollment).await?, false)));
    }

    let change = ProgressChange {
        progress: i16::from(update.snapshot.progress),
        status: update.snapshot.status.into_db_model(),
        completed_at: update.snapshot.completed_at,
    };
    if !enrollment::Mutation::update_progress(txn, enrollment.id, enrollment.version, change).await? {
        return Ok(Round::Lost);
    }

    let stored = enrollment::Query::find_by_id(txn, enrollment.id).await.require("enrollment")?;
    Ok(Round::Done((state_of(txn, stored).await?, update.completed_now)))
}

/// Marks the lesson as completed by the actor and recomputes the enrollment progress.
///
/// Completing the same lesson again leaves the progress untouched.
#[instrument(skip(conn, config, actor), fields(user_id = %actor.user_id))]
pub async fn record_lesson_completion<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    config: &LecternConfig,
    actor: &Actor,
    course_id: Uuid,
    lesson_id: Uuid,
) -> Result<EnrollmentState, LearningError> {
    actor.require(Capability::CompleteLessons)?;

    let lesson = lesson::Query::find_by_id(conn, lesson_id)
        .await?
        .ok_or_else(|| LearningError::not_found("lesson", lesson_id))?;
    if lesson.course_id != course_id {
        return Err(ValidationError::LessonNotInCourse { lesson_id, course_id }.into());
    }

    let enrollment_id = enrollment::Query::find_for_student(conn, actor.user_id, course_id)
        .await?
        .filter(|enrollment| enrollment.status.is_active())
        .ok_or(LearningError::NotEnrolled { course_id })?
        .id;

    let mut retry = Retry::new(config);
    loop {
        let txn = conn.begin().await?;
        match completion_round(&txn, course_id, enrollment_id, lesson_id).await {
            Ok(Round::Done((state, completed_now))) => match txn.commit().await {
                Ok(()) => {
                    if completed_now {
                        tracing::info!(enrollment_id = %state.enrollment_id, "course completed");
                    }
                    tracing::debug!(progress = state.progress, status = %state.status, "recorded lesson completion");
                    return Ok(state);
                }
                Err(error) if is_lock_contention(&error) => {}
                Err(error) => return Err(error.into()),
            },
            Ok(Round::Lost) => txn.rollback().await?,
            Err(LearningError::Database(error)) if is_lock_contention(&error) => txn.rollback().await?,
            Err(error) => {
                txn.rollback().await?;
                return Err(error);
            }
        }

        tracing::debug!(%course_id, retries = retry.retries(), "enrollment changed concurrently, retrying");
        retry
            .lost()
            .await
            .inspect_err(|_| tracing::warn!(%course_id, "giving up on progress update"))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn fresh() -> ProgressSnapshot {
        ProgressSnapshot {
            progress: 0,
            status: EnrollmentStatus::Active,
            completed_at: None,
        }
    }

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(3, 0), 0);
        assert_eq!(completion_percentage(2, 4), 50);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 66);
        assert_eq!(completion_percentage(4, 4), 100);
        assert_eq!(completion_percentage(9, 4), 100);
    }

    #[test]
    fn test_four_lessons() {
        let half = fresh().advance(2, 4, now());
        assert_eq!(half.snapshot.progress, 50);
        assert_eq!(half.snapshot.status, EnrollmentStatus::InProgress);
        assert!(half.changed);
        assert!(!half.completed_now);

        let done = half.snapshot.advance(4, 4, now());
        assert_eq!(done.snapshot.progress, 100);
        assert_eq!(done.snapshot.status, EnrollmentStatus::Completed);
        assert!(done.snapshot.completed_at.is_some());
        assert!(done.completed_now);

        let again = done.snapshot.advance(4, 4, now());
        assert!(!again.changed);
        assert!(!again.completed_now);
    }

    #[test]
    fn test_new_lessons_keep_progress() {
        let done = fresh().advance(2, 2, now()).snapshot;
        let later = done.advance(2, 4, now());
        assert_eq!(later.snapshot.progress, 100);
        assert_eq!(later.snapshot.status, EnrollmentStatus::Completed);
        assert_eq!(later.snapshot.completed_at, done.completed_at);
    }

    #[test]
    fn test_small_share_is_in_progress() {
        let update = fresh().advance(1, 200, now());
        assert_eq!(update.snapshot.progress, 0);
        assert_eq!(update.snapshot.status, EnrollmentStatus::InProgress);
    }

    #[test]
    fn test_dropped_is_untouched() {
        let dropped = ProgressSnapshot {
            progress: 20,
            status: EnrollmentStatus::Dropped,
            completed_at: None,
        };
        assert_eq!(dropped.advance(5, 5, now()).snapshot, dropped);
    }

    proptest! {
        #[test]
        fn progress_is_order_independent(
            total in 1u64..30,
            events in proptest::collection::vec(0u64..30, 0..60),
        ) {
            let mut seen = std::collections::HashSet::new();
            let mut snapshot = fresh();
            for lesson in events.iter().filter(|lesson| **lesson < total) {
                seen.insert(*lesson);
                let update = snapshot.advance(seen.len() as u64, total, now());
                prop_assert!(update.snapshot.progress >= snapshot.progress);
                prop_assert!(rank(update.snapshot.status) >= rank(snapshot.status));
                snapshot = update.snapshot;
            }
            prop_assert_eq!(snapshot.progress, completion_percentage(seen.len() as u64, total));
            prop_assert_eq!(snapshot.status == EnrollmentStatus::Completed, seen.len() as u64 == total);
        }

        #[test]
        fn repeated_events_do_not_change_progress(completed in 0u64..50, extra in 0u64..50) {
            let total = completed + extra;
            let first = fresh().advance(completed, total, now());
            let second = first.snapshot.advance(completed, total, now());
            prop_assert!(!second.changed);
            prop_assert_eq!(second.snapshot, first.snapshot);
        }
    }
}

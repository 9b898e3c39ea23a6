use crate::enrollment::Query;
use crate::util::{FlattenTransactionResultExt, RequireRecord};
use chrono::{NaiveDateTime, Utc};
use lectern_entity::enrollment::{self, ActiveModel, Entity as EnrollmentEntity, Model as Enrollment, Status};
use sea_orm::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, TransactionTrait, TryInsertResult};

fn create_on_conflict() -> OnConflict {
    OnConflict::columns([enrollment::Column::StudentId, enrollment::Column::CourseId])
}

/// Values written by a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressChange {
    pub progress: i16,
    pub status: Status,
    pub completed_at: Option<NaiveDateTime>,
}

pub struct Mutation;

impl Mutation {
    /// Returns the enrollment of the student, creating it if there is none yet.
    pub async fn get_or_create<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, DbErr> {
        let now = Utc::now().naive_utc();
        let val = ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            student_id: ActiveValue::Set(student_id),
            course_id: ActiveValue::Set(course_id),
            status: ActiveValue::Set(Status::Active),
            progress: ActiveValue::Set(0),
            version: ActiveValue::Set(0),
            enrolled_at: ActiveValue::Set(now),
            completed_at: ActiveValue::Set(None),
            last_accessed: ActiveValue::Set(now),
        };

        let res = conn
            .transaction(|txn| {
                Box::pin(async move {
                    let mut on_conflict = create_on_conflict();
                    on_conflict.do_nothing();
                    EnrollmentEntity::insert(val)
                        .on_conflict(on_conflict)
                        .do_nothing()
                        .exec(txn)
                        .await
                })
            })
            .await
            .flatten_res()?;
        if matches!(res, TryInsertResult::Empty) {
            return Err(DbErr::RecordNotInserted);
        }

        tracing::debug!(%student_id, %course_id, "getting {} enrollment", match res {
            TryInsertResult::Conflicted => "existing",
            _ => "created",
        });

        Query::find_for_student(conn, student_id, course_id)
            .await
            .require("enrollment")
    }

    /// Writes the new progress if nobody else updated the row since `expected_version` was read.
    ///
    /// Returns `false` if the version did not match and nothing was written.
    pub async fn update_progress<C: ConnectionTrait>(
        conn: &C,
        enrollment_id: Uuid,
        expected_version: i32,
        change: ProgressChange,
    ) -> Result<bool, DbErr> {
        let data = ActiveModel {
            progress: ActiveValue::Set(change.progress),
            status: ActiveValue::Set(change.status),
            completed_at: ActiveValue::Set(change.completed_at),
            last_accessed: ActiveValue::Set(Utc::now().naive_utc()),
            version: ActiveValue::Set(expected_version + 1),
            ..Default::default()
        };

        let res = EnrollmentEntity::update_many()
            .set(data)
            .filter(enrollment::Column::Id.eq(enrollment_id))
            .filter(enrollment::Column::Version.eq(expected_version))
            .exec(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn std::error::Error, %enrollment_id, "failed to update progress");
            })?;

        tracing::trace!(%enrollment_id, expected_version, rows = res.rows_affected, "progress update");
        Ok(res.rows_affected == 1)
    }

    /// Updates `last_accessed` without touching the version.
    ///
    /// As the first statement of a transaction this takes the write lock before anything is read.
    pub async fn touch<C: ConnectionTrait>(conn: &C, enrollment_id: Uuid) -> Result<(), DbErr> {
        EnrollmentEntity::update_many()
            .col_expr(enrollment::Column::LastAccessed, Expr::value(Utc::now().naive_utc()))
            .filter(enrollment::Column::Id.eq(enrollment_id))
            .exec(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn std::error::Error, %enrollment_id, "failed to touch enrollment");
            })?;
        Ok(())
    }

    /// Version checked status change, used to drop and reactivate enrollments.
    pub async fn set_status<C: ConnectionTrait>(
        conn: &C,
        enrollment_id: Uuid,
        expected_version: i32,
        status: Status,
    ) -> Result<bool, DbErr> {
        let data = ActiveModel {
            status: ActiveValue::Set(status),
            last_accessed: ActiveValue::Set(Utc::now().naive_utc()),
            version: ActiveValue::Set(expected_version + 1),
            ..Default::default()
        };

        let res = EnrollmentEntity::update_many()
            .set(data)
            .filter(enrollment::Column::Id.eq(enrollment_id))
            .filter(enrollment::Column::Version.eq(expected_version))
            .exec(conn)
            .await?;
        Ok(res.rows_affected == 1)
    }
}

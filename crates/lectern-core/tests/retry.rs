use chrono::Utc;
use lectern_config::{ConcurrencyConfig, LecternConfig};
use lectern_core::enrollment::drop_enrollment;
use lectern_core::error::{ErrorKind, LearningError};
use lectern_core::progress::record_lesson_completion;
use lectern_entity::{enrollment, lesson};
use lectern_model::actor::{Actor, Role};
use lectern_model::enrollment::EnrollmentStatus;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use std::collections::BTreeMap;
use test_log::test;
use uuid::Uuid;

fn config(max_retries: u32) -> LecternConfig {
    LecternConfig {
        concurrency: ConcurrencyConfig { max_retries },
        ..Default::default()
    }
}

fn rows(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn count(n: i64) -> Vec<BTreeMap<&'static str, Value>> {
    vec![BTreeMap::from([("num_items", Value::BigInt(Some(n)))])]
}

struct Fixture {
    student: Actor,
    course_id: Uuid,
    lesson: lesson::Model,
    enrollment: enrollment::Model,
}

impl Fixture {
    fn new() -> Self {
        let now = Utc::now().naive_utc();
        let student = Actor::new(Uuid::new_v4(), Role::Student);
        let course_id = Uuid::new_v4();
        Self {
            lesson: lesson::Model {
                id: Uuid::new_v4(),
                course_id,
                title: "Ownership".to_owned(),
                position: 1,
                content_url: None,
                created_at: now,
            },
            enrollment: enrollment::Model {
                id: Uuid::new_v4(),
                student_id: student.user_id,
                course_id,
                status: enrollment::Status::Active,
                progress: 0,
                version: 0,
                enrolled_at: now,
                completed_at: None,
                last_accessed: now,
            },
            student,
            course_id,
        }
    }

    fn enrollment_at(&self, version: i32) -> Vec<enrollment::Model> {
        vec![enrollment::Model {
            version,
            ..self.enrollment.clone()
        }]
    }
}

#[test(tokio::test)]
async fn test_progress_update_gives_up_after_max_retries() {
    let fixture = Fixture::new();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![fixture.lesson.clone()]])
        .append_query_results([fixture.enrollment_at(0)])
        // first round
        .append_query_results([fixture.enrollment_at(0)])
        .append_query_results([count(1), count(4)])
        // second round
        .append_query_results([fixture.enrollment_at(0)])
        .append_query_results([count(1), count(4)])
        .append_exec_results([rows(1), rows(0), rows(0), rows(0)])
        .into_connection();

    let err = record_lesson_completion(&db, &config(1), &fixture.student, fixture.course_id, fixture.lesson.id)
        .await
        .unwrap_err();

    assert!(matches!(err, LearningError::Conflict { retries: 1 }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.error_data().is_some());
}

#[test(tokio::test)]
async fn test_progress_update_retries_after_version_mismatch() {
    let fixture = Fixture::new();
    let updated = enrollment::Model {
        status: enrollment::Status::InProgress,
        progress: 25,
        version: 1,
        ..fixture.enrollment.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![fixture.lesson.clone()]])
        .append_query_results([fixture.enrollment_at(0)])
        // lost round
        .append_query_results([fixture.enrollment_at(0)])
        .append_query_results([count(1), count(4)])
        // winning round, the completion row already exists
        .append_query_results([fixture.enrollment_at(0)])
        .append_query_results([count(1), count(4)])
        .append_query_results([vec![updated]])
        .append_query_results([count(1), count(4)])
        .append_exec_results([rows(1), rows(0), rows(0), rows(1)])
        .into_connection();

    let state = record_lesson_completion(&db, &config(1), &fixture.student, fixture.course_id, fixture.lesson.id)
        .await
        .unwrap();

    assert_eq!(state.progress, 25);
    assert_eq!(state.status, EnrollmentStatus::InProgress);
    assert_eq!(state.completed_lessons, 1);
    assert_eq!(state.total_lessons, 4);
}

#[test(tokio::test)]
async fn test_status_change_gives_up_after_max_retries() {
    let fixture = Fixture::new();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([fixture.enrollment_at(0), fixture.enrollment_at(1)])
        .append_exec_results([rows(0), rows(0)])
        .into_connection();

    let err = drop_enrollment(&db, &config(1), &fixture.student, fixture.course_id)
        .await
        .unwrap_err();

    assert!(matches!(err, LearningError::Conflict { retries: 1 }));
}

use crate::common::{create_actor, enrolled_student, published_course, setup_db};
use lectern_config::LecternConfig;
use lectern_core::catalog::{self, CourseDraft};
use lectern_core::enrollment::{course_progress_summary, drop_enrollment, enroll, enrollment_state};
use lectern_core::error::{ErrorKind, LearningError, ValidationError};
use lectern_core::progress::record_lesson_completion;
use lectern_entity::user::Role;
use lectern_model::enrollment::EnrollmentStatus;
use test_log::test;

mod common;

#[test(tokio::test)]
async fn test_enroll_twice() {
    let db = setup_db().await;
    let config = LecternConfig::default();
    let instructor = create_actor(&db, "instructor", Role::Instructor).await;
    let (course, _) = published_course(&db, &instructor, "rust-101", 3).await;
    let student = create_actor(&db, "student", Role::Student).await;

    let first = enroll(&db, &config, &student, course.id).await.unwrap();
    let second = enroll(&db, &config, &student, course.id).await.unwrap();

    assert_eq!(first.enrollment_id, second.enrollment_id);
    assert_eq!(second.status, EnrollmentStatus::Active);
    assert_eq!(second.progress, 0);
    assert_eq!(second.total_lessons, 3);
}

#[test(tokio::test)]
async fn test_enroll_requires_published_course() {
    let db = setup_db().await;
    let config = LecternConfig::default();
    let instructor = create_actor(&db, "instructor", Role::Instructor).await;
    let student = create_actor(&db, "student", Role::Student).await;
    let draft = catalog::create_course(
        &db,
        &instructor,
        CourseDraft {
            title: "Unfinished".to_owned(),
            slug: "unfinished".to_owned(),
            description: String::new(),
        },
    )
    .await
    .unwrap();

    let err = enroll(&db, &config, &student, draft.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = enroll(&db, &config, &instructor, draft.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let err = enrollment_state(&db, &student, draft.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotEnrolled);
}

#[test(tokio::test)]
async fn test_drop_and_reenroll_keeps_progress() {
    let db = setup_db().await;
    let config = LecternConfig::default();
    let instructor = create_actor(&db, "instructor", Role::Instructor).await;
    let (course, lessons) = published_course(&db, &instructor, "rust-101", 4).await;
    let student = enrolled_student(&db, &course, "student").await;
    record_lesson_completion(&db, &config, &student, course.id, lessons[0].id).await.unwrap();

    let dropped = drop_enrollment(&db, &config, &student, course.id).await.unwrap();
    assert_eq!(dropped.status, EnrollmentStatus::Dropped);
    assert_eq!(dropped.progress, 25);

    let err = drop_enrollment(&db, &config, &student, course.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotEnrolled);

    let back = enroll(&db, &config, &student, course.id).await.unwrap();
    assert_eq!(back.enrollment_id, dropped.enrollment_id);
    assert_eq!(back.status, EnrollmentStatus::InProgress);
    assert_eq!(back.progress, 25);
    assert_eq!(back.completed_lessons, 1);
}

#[test(tokio::test)]
async fn test_reenroll_after_small_share_is_in_progress() {
    let db = setup_db().await;
    let config = LecternConfig::default();
    let instructor = create_actor(&db, "instructor", Role::Instructor).await;
    let (course, lessons) = published_course(&db, &instructor, "rust-101", 101).await;
    let student = enrolled_student(&db, &course, "student").await;

    let state = record_lesson_completion(&db, &config, &student, course.id, lessons[0].id).await.unwrap();
    assert_eq!(state.progress, 0);
    assert_eq!(state.status, EnrollmentStatus::InProgress);

    drop_enrollment(&db, &config, &student, course.id).await.unwrap();
    let back = enroll(&db, &config, &student, course.id).await.unwrap();
    assert_eq!(back.progress, 0);
    assert_eq!(back.completed_lessons, 1);
    assert_eq!(back.status, EnrollmentStatus::InProgress);
}

#[test(tokio::test)]
async fn test_completed_enrollment_cannot_be_dropped() {
    let db = setup_db().await;
    let config = LecternConfig::default();
    let instructor = create_actor(&db, "instructor", Role::Instructor).await;
    let (course, lessons) = published_course(&db, &instructor, "rust-101", 1).await;
    let student = enrolled_student(&db, &course, "student").await;
    record_lesson_completion(&db, &config, &student, course.id, lessons[0].id).await.unwrap();

    let err = drop_enrollment(&db, &config, &student, course.id).await.unwrap_err();
    assert!(matches!(err, LearningError::Validation(ValidationError::EnrollmentCompleted)));
    let state = enrollment_state(&db, &student, course.id).await.unwrap();
    assert_eq!(state.status, EnrollmentStatus::Completed);
}

#[test(tokio::test)]
async fn test_progress_summary() {
    let db = setup_db().await;
    let config = LecternConfig::default();
    let instructor = create_actor(&db, "instructor", Role::Instructor).await;
    let other_instructor = create_actor(&db, "other", Role::Instructor).await;
    let (course, lessons) = published_course(&db, &instructor, "rust-101", 2).await;

    let alice = enrolled_student(&db, &course, "alice").await;
    let bob = enrolled_student(&db, &course, "bob").await;
    let carol = enrolled_student(&db, &course, "carol").await;
    enrolled_student(&db, &course, "dave").await;

    for lesson in &lessons {
        record_lesson_completion(&db, &config, &alice, course.id, lesson.id).await.unwrap();
    }
    record_lesson_completion(&db, &config, &bob, course.id, lessons[0].id).await.unwrap();
    drop_enrollment(&db, &config, &carol, course.id).await.unwrap();

    let summary = course_progress_summary(&db, &instructor, course.id).await.unwrap();
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.active, 1);
    assert_eq!(summary.dropped, 1);
    assert_eq!(summary.enrolled(), 3);

    let err = course_progress_summary(&db, &other_instructor, course.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

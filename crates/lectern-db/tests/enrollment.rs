use crate::common::{create_test_course, create_test_user, setup_db};
use lectern_db::enrollment::{self, ProgressChange};
use lectern_db::lesson_completion;
use lectern_entity::enrollment::Status;
use lectern_entity::user::Role;
use test_log::test;

mod common;

#[test(tokio::test)]
async fn test_get_or_create_is_idempotent() {
    let db = setup_db().await;
    let instructor = create_test_user(&db, "instructor", Role::Instructor).await;
    let student = create_test_user(&db, "student", Role::Student).await;
    let (course, _) = create_test_course(&db, &instructor, "rust-101", 2).await;

    let first = enrollment::Mutation::get_or_create(&db, student.id, course.id).await.unwrap();
    let second = enrollment::Mutation::get_or_create(&db, student.id, course.id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.status, Status::Active);
    assert_eq!(first.progress, 0);
    assert_eq!(first.version, 0);
    assert_eq!(enrollment::Query::list_for_student(&db, student.id).await.unwrap().len(), 1);
}

#[test(tokio::test)]
async fn test_update_progress_checks_version() {
    let db = setup_db().await;
    let instructor = create_test_user(&db, "instructor", Role::Instructor).await;
    let student = create_test_user(&db, "student", Role::Student).await;
    let (course, _) = create_test_course(&db, &instructor, "rust-101", 2).await;
    let enrollment = enrollment::Mutation::get_or_create(&db, student.id, course.id).await.unwrap();

    let change = ProgressChange {
        progress: 50,
        status: Status::InProgress,
        completed_at: None,
    };
    assert!(enrollment::Mutation::update_progress(&db, enrollment.id, 0, change).await.unwrap());
    // stale version
    assert!(!enrollment::Mutation::update_progress(&db, enrollment.id, 0, change).await.unwrap());

    let stored = enrollment::Query::find_by_id(&db, enrollment.id).await.unwrap().unwrap();
    assert_eq!(stored.progress, 50);
    assert_eq!(stored.status, Status::InProgress);
    assert_eq!(stored.version, 1);

    assert!(enrollment::Mutation::set_status(&db, enrollment.id, 1, Status::Dropped).await.unwrap());
    let stored = enrollment::Query::find_by_id(&db, enrollment.id).await.unwrap().unwrap();
    assert_eq!(stored.status, Status::Dropped);
    assert_eq!(stored.progress, 50);
}

#[test(tokio::test)]
async fn test_mark_completed_once() {
    let db = setup_db().await;
    let instructor = create_test_user(&db, "instructor", Role::Instructor).await;
    let student = create_test_user(&db, "student", Role::Student).await;
    let (course, lessons) = create_test_course(&db, &instructor, "rust-101", 3).await;
    let enrollment = enrollment::Mutation::get_or_create(&db, student.id, course.id).await.unwrap();

    assert!(lesson_completion::Mutation::mark_completed(&db, enrollment.id, lessons[0].id).await.unwrap());
    assert!(!lesson_completion::Mutation::mark_completed(&db, enrollment.id, lessons[0].id).await.unwrap());
    assert!(lesson_completion::Mutation::mark_completed(&db, enrollment.id, lessons[2].id).await.unwrap());

    assert_eq!(lesson_completion::Query::count_for_enrollment(&db, enrollment.id).await.unwrap(), 2);
    let mut completed = lesson_completion::Query::completed_lessons(&db, enrollment.id).await.unwrap();
    completed.sort();
    let mut expected = vec![lessons[0].id, lessons[2].id];
    expected.sort();
    assert_eq!(completed, expected);
}

#[test(tokio::test)]
async fn test_status_counts() {
    let db = setup_db().await;
    let instructor = create_test_user(&db, "instructor", Role::Instructor).await;
    let (course, _) = create_test_course(&db, &instructor, "rust-101", 1).await;

    for name in ["a", "b", "c"] {
        let student = create_test_user(&db, name, Role::Student).await;
        let enrollment = enrollment::Mutation::get_or_create(&db, student.id, course.id).await.unwrap();
        if name == "c" {
            let change = ProgressChange {
                progress: 100,
                status: Status::Completed,
                completed_at: Some(chrono::Utc::now().naive_utc()),
            };
            assert!(enrollment::Mutation::update_progress(&db, enrollment.id, 0, change).await.unwrap());
        }
    }

    let mut counts: Vec<_> = enrollment::Query::status_counts(&db, course.id)
        .await
        .unwrap()
        .into_iter()
        .map(|count| (count.status, count.count))
        .collect();
    counts.sort_by_key(|(_, count)| *count);

    assert_eq!(counts, vec![(Status::Completed, 1), (Status::Active, 2)]);
}

#[test(tokio::test)]
async fn test_touch_keeps_version() {
    let db = setup_db().await;
    let instructor = create_test_user(&db, "instructor", Role::Instructor).await;
    let student = create_test_user(&db, "student", Role::Student).await;
    let (course, _) = create_test_course(&db, &instructor, "rust-101", 2).await;
    let enrollment = enrollment::Mutation::get_or_create(&db, student.id, course.id).await.unwrap();

    enrollment::Mutation::touch(&db, enrollment.id).await.unwrap();

    let touched = enrollment::Query::find_by_id(&db, enrollment.id).await.unwrap().unwrap();
    assert_eq!(touched.version, enrollment.version);
    assert_eq!(touched.progress, enrollment.progress);
    assert!(touched.last_accessed >= enrollment.last_accessed);
}

#![allow(dead_code)]

use lectern_config::LecternConfig;
use lectern_core::LoadActor;
use lectern_core::catalog::{self, CourseDraft, QuestionDraft, QuizDraft};
use lectern_core::enrollment;
use lectern_db::schema::setup_schema;
use lectern_db::user;
use lectern_entity::user::Role;
use lectern_model::actor::Actor;
use lectern_model::course::{Course, Lesson};
use lectern_model::quiz::{Answer, Question, Quiz};
use sea_orm::{Database, DatabaseConnection};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

pub async fn create_actor(db: &DatabaseConnection, name: &str, role: Role) -> Actor {
    let user = user::Mutation::create_user(db, name.to_owned(), format!("{name}@example.org"), role)
        .await
        .unwrap();
    Actor::load(db, user.id).await.unwrap()
}

/// A published course with `lessons` lessons.
pub async fn published_course(db: &DatabaseConnection, instructor: &Actor, slug: &str, lessons: usize) -> (Course, Vec<Lesson>) {
    let course = catalog::create_course(
        db,
        instructor,
        CourseDraft {
            title: format!("Course {slug}"),
            slug: slug.to_owned(),
            description: String::new(),
        },
    )
    .await
    .unwrap();

    let mut created = Vec::with_capacity(lessons);
    for i in 0..lessons {
        created.push(
            catalog::add_lesson(db, instructor, course.id, format!("Lesson {}", i + 1), None)
                .await
                .unwrap(),
        );
    }
    let course = catalog::publish_course(db, instructor, course.id).await.unwrap();
    (course, created)
}

/// A published quiz with one question per weight, the correct option of question `i` is `i % 4`.
pub async fn published_quiz(
    db: &DatabaseConnection,
    config: &LecternConfig,
    instructor: &Actor,
    course: &Course,
    weights: &[u32],
    max_attempts: Option<u32>,
) -> (Quiz, Vec<Question>) {
    let quiz = catalog::create_quiz(
        db,
        config,
        instructor,
        QuizDraft {
            course_id: course.id,
            lesson_id: None,
            title: "Checkpoint".to_owned(),
            passing_score: None,
            max_attempts,
        },
    )
    .await
    .unwrap();

    let mut questions = Vec::with_capacity(weights.len());
    for (i, points) in weights.iter().enumerate() {
        let draft = QuestionDraft {
            text: format!("Question {}", i + 1),
            options: ["a", "b", "c", "d"].map(str::to_owned).to_vec(),
            correct_option: u32::try_from(i % 4).unwrap(),
            points: *points,
            explanation: Some("because".to_owned()),
        };
        questions.push(catalog::add_question(db, instructor, quiz.id, draft).await.unwrap());
    }
    let quiz = catalog::publish_quiz(db, instructor, quiz.id).await.unwrap();
    (quiz, questions)
}

pub async fn enrolled_student(db: &DatabaseConnection, course: &Course, name: &str) -> Actor {
    let student = create_actor(db, name, Role::Student).await;
    enrollment::enroll(db, &LecternConfig::default(), &student, course.id)
        .await
        .unwrap();
    student
}

pub fn answer(question: &Question, selected_option: Option<u32>) -> Answer {
    Answer {
        question_id: question.id,
        selected_option,
    }
}

pub fn correct(question: &Question) -> Answer {
    answer(question, Some(question.correct_option))
}

pub fn wrong(question: &Question) -> Answer {
    answer(question, Some((question.correct_option + 1) % 4))
}

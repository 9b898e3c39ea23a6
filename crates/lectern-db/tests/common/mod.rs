use lectern_db::schema::setup_schema;
use lectern_db::{course, lesson, user};
use lectern_entity::course::Model as Course;
use lectern_entity::lesson::Model as Lesson;
use lectern_entity::user::{Model as User, Role};
use sea_orm::{Database, DatabaseConnection};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

pub async fn create_test_user(db: &DatabaseConnection, name: &str, role: Role) -> User {
    user::Mutation::create_user(db, name.to_owned(), format!("{name}@example.org"), role)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_course(db: &DatabaseConnection, instructor: &User, slug: &str, lessons: usize) -> (Course, Vec<Lesson>) {
    let course = course::Mutation::create(db, instructor.id, format!("Course {slug}"), slug.to_owned(), String::new())
        .await
        .unwrap();
    let mut created = Vec::with_capacity(lessons);
    for i in 0..lessons {
        created.push(
            lesson::Mutation::append(db, course.id, format!("Lesson {}", i + 1), None)
                .await
                .unwrap(),
        );
    }
    (course, created)
}

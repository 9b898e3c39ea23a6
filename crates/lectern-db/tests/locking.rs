use lectern_db::schema::setup_schema;
use lectern_db::user;
use lectern_db::util::is_lock_contention;
use lectern_entity::user::Role;
use lectern_test_helpers::{SqliteDb, TestDb};
use sea_orm::{Database, TransactionTrait};
use test_log::test;

#[test(tokio::test)]
async fn test_write_after_read_on_busy_file_is_lock_contention() {
    let db = SqliteDb::new().unwrap();
    let first = Database::connect(db.db_uri().into_owned()).await.unwrap();
    setup_schema(&first).await.unwrap();
    let second = Database::connect(db.db_uri().into_owned()).await.unwrap();

    let reader = second.begin().await.unwrap();
    assert!(user::Query::find_user_by_email(&reader, "nobody@example.org").await.unwrap().is_none());

    let writer = first.begin().await.unwrap();
    user::Mutation::create_user(&writer, "first".to_owned(), "first@example.org".to_owned(), Role::Student)
        .await
        .unwrap();

    // the reader holds a shared lock, so sqlite refuses the upgrade without waiting
    let err = user::Mutation::create_user(&reader, "second".to_owned(), "second@example.org".to_owned(), Role::Student)
        .await
        .unwrap_err();
    assert!(is_lock_contention(&err), "{err:?}");

    reader.rollback().await.unwrap();
    writer.commit().await.unwrap();
    assert!(user::Query::find_user_by_email(&first, "first@example.org").await.unwrap().is_some());
}

use lectern_db::{enrollment, lesson};
use lectern_entity::enrollment::Status;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use std::collections::BTreeMap;
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_count_lessons() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(4)))])]])
        .into_connection();

    assert_eq!(lesson::Query::count_for_course(&db, Uuid::new_v4()).await?, 4);

    Ok(())
}

#[test(tokio::test)]
async fn test_stale_progress_update_writes_nothing() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let change = enrollment::ProgressChange {
        progress: 25,
        status: Status::InProgress,
        completed_at: None,
    };
    assert!(!enrollment::Mutation::update_progress(&db, Uuid::new_v4(), 3, change).await?);

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);

    Ok(())
}

use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr};

const SQLITE_SCHEMA: &str = include_str!("../schema/sqlite.sql");
const POSTGRES_SCHEMA: &str = include_str!("../schema/postgres.sql");

/// Creates all tables (and postgres enum types) if they do not exist yet.
pub async fn setup_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = match backend {
        DatabaseBackend::Postgres => POSTGRES_SCHEMA,
        DatabaseBackend::Sqlite => SQLITE_SCHEMA,
        DatabaseBackend::MySql => return Err(DbErr::Custom("mysql is not supported".to_owned())),
    };

    tracing::debug!(?backend, "applying schema");
    conn.execute_unprepared(schema).await.inspect_err(|error| {
        tracing::error!(error = error as &dyn std::error::Error, ?backend, "failed to apply schema");
    })?;
    Ok(())
}

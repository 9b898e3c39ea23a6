use sea_orm::{DbErr, SqlErr, TransactionError};
use std::error::Error;

pub trait FlattenTransactionResultExt<T> {
    fn flatten_res(self) -> T;
}

impl<T, E> FlattenTransactionResultExt<Result<T, E>> for Result<T, TransactionError<E>>
where
    E: From<DbErr> + Error,
{
    fn flatten_res(self) -> Result<T, E> {
        self.map_err(|err| match err {
            TransactionError::Connection(err) => err.into(),
            TransactionError::Transaction(err) => err,
        })
    }
}

pub trait RequireRecord<T> {
    fn require(self, what: &str) -> Result<T, DbErr>;
}

impl<T> RequireRecord<T> for Result<Option<T>, DbErr> {
    fn require(self, what: &str) -> Result<T, DbErr> {
        self?.ok_or_else(|| DbErr::RecordNotFound(format!("{what} not found")))
    }
}

/// Returns true if the error was raised by a unique or primary key constraint.
#[must_use]
pub fn is_unique_violation(error: &DbErr) -> bool {
    matches!(error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Returns true if the statement lost a race for a database lock and the transaction can be run again.
///
/// `SQLite` reports this as `SQLITE_BUSY` or `SQLITE_LOCKED` (or one of their extended codes), `PostgreSQL` as a
/// serialization failure or a deadlock.
#[must_use]
pub fn is_lock_contention(error: &DbErr) -> bool {
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    {
        use sea_orm::{RuntimeErr, sqlx};

        if let DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e))) = error
        {
            #[cfg(feature = "sqlite")]
            if e.try_downcast_ref::<sqlx::sqlite::SqliteError>().is_some() {
                const SQLITE_BUSY: i32 = 5;
                const SQLITE_LOCKED: i32 = 6;
                return e
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED));
            }
            #[cfg(feature = "postgres")]
            if e.try_downcast_ref::<sqlx::postgres::PgDatabaseError>().is_some() {
                return matches!(e.code().as_deref(), Some("40001" | "40P01"));
            }
        }
    }
    false
}

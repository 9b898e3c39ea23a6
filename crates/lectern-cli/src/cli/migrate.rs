use crate::cli::connect;
use crate::opt::Migrate;
use anyhow::Error;
use lectern_db::schema::setup_schema;
use sea_orm::ConnectionTrait;

pub(crate) async fn migrate(opt: Migrate) -> Result<(), Error> {
    let conn = connect(&opt.db).await?;
    setup_schema(&conn).await?;
    tracing::info!(backend = ?conn.get_database_backend(), "schema is up to date");
    Ok(())
}

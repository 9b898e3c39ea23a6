pub(crate) mod opt;
mod learn;
mod migrate;

use crate::opt::Commands;
use anyhow::Error;
use lectern_config::LecternConfig;
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use std::path::Path;

pub(crate) async fn exec(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Migrate(o) => migrate::migrate(o).await,
        Commands::Enroll(o) => print(&learn::enroll(o).await?),
        Commands::CompleteLesson(o) => print(&learn::complete_lesson(o).await?),
        Commands::SubmitQuiz(o) => print(&learn::submit_quiz(o).await?),
        Commands::ConfigSchema => {
            println!("{}", lectern_config::schema()?);
            Ok(())
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn connect(db: &lectern_utils::args::db::Db) -> Result<DatabaseConnection, Error> {
    let conn = Database::connect(db.connect_options()).await?;
    Ok(conn)
}

async fn load_config(path: Option<&Path>) -> Result<LecternConfig, Error> {
    match path {
        Some(path) => Ok(lectern_config::load(path).await?),
        None => Ok(LecternConfig::default()),
    }
}

use clap::Args;
use sea_orm::ConnectOptions;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct Db {
    #[arg(long, env = "DATABASE_URL", help = "Database url, e.g. sqlite://lectern.db?mode=rwc")]
    pub db_url: Url,

    #[arg(long, env = "DB_MIN_CONNECTIONS", help = "Min connections")]
    pub db_min_connections: Option<u32>,

    #[arg(long, env = "DB_MAX_CONNECTIONS", help = "Max connections")]
    pub db_max_connections: Option<u32>,
}

impl Db {
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.db_url.as_str());
        if let Some(min_connections) = self.db_min_connections {
            options.min_connections(min_connections);
        }
        if let Some(max_connections) = self.db_max_connections {
            options.max_connections(max_connections);
        }
        options.sqlx_logging_level(log::LevelFilter::Debug);
        options
    }
}

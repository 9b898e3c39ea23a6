mod cli;

use anyhow::Result;
use clap::Parser;
use cli::opt;
use lectern_utils::tracing::{TracingConfig, setup};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = opt::Cli::parse();
    let _guard = setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn.clone())
            .env(opt.env.clone())
            .build(),
    )?;

    cli::exec(opt.command).await
}

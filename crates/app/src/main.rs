mod cli;
mod commands;
mod db_url;
mod logging;

use std::error::Error;

use clap::Parser;
use tracing::debug;

use services::{AppServices, Clock};

use crate::cli::Cli;
use crate::db_url::{normalize_sqlite_url, prepare_sqlite_file};

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let db_url = normalize_sqlite_url(&cli.db)?;
    debug!(%db_url, "opening database");

    // Open + migrate SQLite at startup; services stay storage-agnostic.
    prepare_sqlite_file(&db_url)?;
    let app = AppServices::new_sqlite(&db_url, Clock::system()).await?;

    commands::dispatch(&app, cli.command).await
}

fn report(err: &dyn Error) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli).await {
        report(err.as_ref());
        std::process::exit(2);
    }
}

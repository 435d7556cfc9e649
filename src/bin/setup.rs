//! One-shot database setup: checks configuration, connectivity and schema.

use campus_market_lib::api::config::Config;
use campus_market_lib::data::database::Database;
use campus_market_lib::data::migrations::SchemaStatus;
use campus_market_lib::utils::logger::init_logger;
use std::process::ExitCode;

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    eprintln!("Configuration OK");

    let db = Database::new(&config.database_url, 1)?;

    db.ping().await?;
    eprintln!("Connected to {}", config.database_url);

    match db.ensure_schema().await? {
        SchemaStatus::Created => eprintln!("Schema created and categories seeded"),
        SchemaStatus::AlreadyPresent => eprintln!("Schema already present, nothing to do"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    match run().await {
        Ok(()) => {
            eprintln!("Setup complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Setup failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

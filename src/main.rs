use anyhow::Context;
use campus_market_lib::api::config::Config;
use campus_market_lib::api::server;
use campus_market_lib::api::state::AppState;
use campus_market_lib::data::database::Database;
use campus_market_lib::utils::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = Config::from_env().context("Invalid configuration")?;

    let db = Database::new(&config.database_url, config.database_pool_size)
        .context("Failed to open database")?;

    db.ensure_schema().await.context("Failed to prepare schema")?;

    server::serve(AppState::new(db, config)).await
}

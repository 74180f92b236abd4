use rental_desk::{
    bot::{self, BotData},
    config::{business, database},
    core::session::Session,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Business identity and console settings
    let config = business::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;
    info!("Issuing invoices as {}", config.business.name);

    // 4. Entity store; without a database the console serves demo data read-only
    let store = database::open_store().await;
    if !store.is_configured() {
        warn!("No database configured; changes will be refused.");
    }

    // 5. Operator session, ready once startup is done
    let session = Session::new();
    session.finish_loading();

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(store, Arc::new(config), session))
        .await
        .map_err(Error::from)?;

    Ok(())
}

// Entrypoint for the movie manager.
// Loads configuration, sets up logging on stderr, prepares the database
// and hands control to the menu loop.

use anyhow::Context;
use movies_cli::api::OmdbClient;
use movies_cli::config::Config;
use movies_cli::storage::MovieStorage;
use movies_cli::ui::{main_menu, App};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    info!(
        db = %config.db_path.display(),
        omdb = %config.omdb_base_url,
        api_key_set = config.omdb_api_key.is_some(),
        "starting movie manager"
    );

    let storage = MovieStorage::new(config.db_path.clone());
    storage
        .init()
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
    let omdb = OmdbClient::new(config.omdb_base_url.clone(), config.omdb_api_key.clone())?;

    main_menu(&App { storage, omdb, config })?;
    Ok(())
}

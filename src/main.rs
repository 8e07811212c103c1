use bazaar_sim::account::JsonFileStore;
use bazaar_sim::app::{session::Session, state::App};
use bazaar_sim::catalog::Catalog;
use bazaar_sim::config::Settings;
use bazaar_sim::{api, events};
use anyhow::Context;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "bazaar-sim.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let data_dir = settings.data_dir();
    init_tracing(&data_dir)?;
    info!(endpoint = %settings.endpoint, data_dir = %data_dir.display(), "starting");

    let catalog = Catalog::load(settings.catalog_path.as_deref()).context("loading catalog")?;

    let store = JsonFileStore::open(&data_dir)?;
    let session = Session::sign_in(Box::new(store), &settings.identity(), settings.starting_coins)
        .context("failed to sign in")?;

    let quotes = api::client::fetch_quotes(&settings.endpoint)
        .await
        .context("failed to load bazaar data")?;

    let mut app = App::new(catalog, quotes, session);
    events::run::run_app(&mut app).await?;
    Ok(())
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_tracing(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bazaar_sim=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use autosuggest_cli::{cli::Cli, replay, CatalogBackend};
use autosuggest_config::{Config, ConfigLoader};
use autosuggest_core::{MemoryHost, Rect, SearchController};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins when set
    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path).await?,
        None => Config::default(),
    };
    debug!(path = ?cli.config, "configuration loaded");

    let latency = Duration::from_millis(cli.latency_ms);
    let backend = match &cli.catalog {
        Some(path) => CatalogBackend::load(path, latency).await?,
        None => CatalogBackend::demo(latency)?,
    };

    let host = MemoryHost::new(Rect::new(0.0, 0.0, 320.0, 32.0));
    let controller = SearchController::new(Rc::new(host), Rc::new(backend), config.popup);

    let interval = Duration::from_millis(cli.interval_ms);
    let result = LocalSet::new()
        .run_until(replay(&controller, &cli.keystrokes, interval))
        .await?;
    controller.teardown();

    print!("{}", result.summary());
    println!();
    print!("{}", result.markup);
    Ok(())
}

// Entry point: load the starship catalog and compare the default picks

mod config;
mod presenter;

use std::sync::Arc;

use anyhow::{Context, Result};
use compare_core::ComparisonController;
use swapi_client::SwapiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::presenter::TerminalPresenter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,compare_core=debug,swapi_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        api_root = %config.api_root,
        ships = config.required_ids.len(),
        "Configuration loaded"
    );

    let client = Arc::new(SwapiClient::new().with_base_url(config.api_root.clone()));
    let controller = ComparisonController::new(
        client,
        TerminalPresenter::new(),
        config.api_root,
        config.required_ids,
    );

    controller
        .load_catalog()
        .await
        .context("Failed to load starship catalog")?;

    controller
        .compare_selected()
        .await
        .context("Failed to compare starships")?;

    Ok(())
}

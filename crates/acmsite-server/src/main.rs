//! NSSCE ACM Student Chapter website server.
//!
//! Serves the site's page data from a remotely hosted content document,
//! cached in memory and backed by a bundled fallback copy.

mod logging;
mod routes;
mod server;
mod views;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use acmsite_core::{fallback, Config, DataProvider, ProviderSettings, RemoteSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("Invalid configuration")?;
    let _log_guard = logging::init(config.log_dir.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "Chapter site starting");

    let source = RemoteSource::new(&config.content_url, config.fetch_timeout)?;
    let fallback = fallback::from_config(&config)?;
    let provider = Arc::new(DataProvider::new(
        Arc::new(source),
        fallback,
        ProviderSettings::from(&config),
    ));

    info!(
        url = %config.content_url,
        cache_ttl_ms = config.cache_ttl.as_millis() as u64,
        fallback = provider.has_fallback(),
        "Content provider configured"
    );

    // Serve nothing until content is available
    provider
        .initialize()
        .await
        .context("Startup content initialization failed")?;

    server::run(provider, config.listen_addr()).await?;

    info!("Chapter site stopped");
    Ok(())
}

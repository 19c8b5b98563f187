use anyhow::Context;
use sheets_proxy::{config::app_config::AppConfig, server};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "sheets_proxy=debug,tower_http=info";

#[tokio::main]
#[instrument]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    setup_panic_hook();

    info!("Starting sheets-proxy");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Loaded configuration: {:?}", config);

    match server::start_server(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Server failed: {:?}", e);
            Err(e)
        }
    }
}

fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

use listing_fetch::config::load_config;
use listing_fetch::scraper::{FetchOptions, TracingLogger};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.json".to_string());

    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let url = args.next().unwrap_or_else(|| config.url.clone());

    let fetcher = config.fetcher();
    // Proxy settings are re-read from the environment for this call.
    let options = FetchOptions::from_env().logger(Arc::new(TracingLogger));

    info!("Fetching {}...", url);
    match fetcher.fetch(&url, &options).await {
        Ok(resp) => {
            if !resp.is_success() {
                warn!("Server answered {}", resp.status);
            }
            info!(
                "Fetched {} [{}]: {} bytes at {}",
                resp.url,
                resp.status,
                resp.body.len(),
                resp.fetched_at
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fetch failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

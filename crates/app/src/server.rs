use crate::config::StartConfig;
use repdesk_directory::Directory;
use repdesk_rpc::{Metrics, RateLimitLayer, RpcState};
use repdesk_store::Store;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber
pub fn init_tracing(debug: bool) {
    let filter = if debug {
        // In debug mode, default to "debug" but allow RUST_LOG override
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("debug"))
            .unwrap()
    } else {
        // In normal mode, default to "info" but allow RUST_LOG override
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .unwrap()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Start the repdesk daemon
pub async fn start_server(config: &StartConfig) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting repdesk daemon");
    tracing::info!("  HTTP: {}", config.http_addr);
    tracing::info!("  DB:   {}", config.db_path);

    let store = Store::new(&config.db_path)?;
    let directory = Directory::new(store);

    let metrics = if config.metrics_disable {
        None
    } else {
        Some(Metrics::new()?)
    };

    let rate_limit = config.rate_limit_rps.map(|rps| {
        tracing::info!("  🚦 Rate limit: {} req/s", rps);
        RateLimitLayer::new(rps)
    });

    let state = RpcState::new_with_features(directory, metrics, rate_limit);

    let addr = config.http_addr.clone();
    let server_handle =
        tokio::spawn(async move { repdesk_rpc::start_server(state, &addr).await });

    tracing::info!("✅ repdesk daemon started");
    tracing::info!("Press Ctrl+C to stop");

    tokio::select! {
        result = server_handle => {
            match result {
                Ok(Ok(_)) => tracing::info!("HTTP server stopped"),
                Ok(Err(e)) => tracing::error!("HTTP server error: {}", e),
                Err(e) => tracing::error!("HTTP server task error: {}", e),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

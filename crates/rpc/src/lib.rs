mod error;
mod handlers;
mod metrics;
mod middleware;
mod types;

pub use error::*;
pub use metrics::*;
pub use middleware::*;
pub use types::*;

use axum::{
    Router,
    extract::Request,
    middleware::{Next, from_fn, from_fn_with_state},
    routing::{get, post},
};
use repdesk_directory::Directory;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// HTTP server state
#[derive(Clone)]
pub struct RpcState {
    /// Directory core
    pub directory: Arc<RwLock<Directory>>,
    /// Metrics collector (optional)
    pub metrics: Option<Arc<Metrics>>,
    /// Rate limiter (optional)
    pub rate_limiter: Option<SharedRateLimiter>,
}

impl RpcState {
    /// Create a new server state
    pub fn new(directory: Directory) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            metrics: None,
            rate_limiter: None,
        }
    }

    /// Create a new server state with metrics
    pub fn new_with_metrics(directory: Directory, metrics: Metrics) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            metrics: Some(Arc::new(metrics)),
            rate_limiter: None,
        }
    }

    /// Create a new server state with all features
    pub fn new_with_features(
        directory: Directory,
        metrics: Option<Metrics>,
        rate_limit: Option<RateLimitLayer>,
    ) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            metrics: metrics.map(Arc::new),
            rate_limiter: rate_limit.map(|layer| layer.limiter),
        }
    }
}

/// Metrics endpoint handler
async fn metrics_handler(axum::extract::State(state): axum::extract::State<RpcState>) -> String {
    state
        .metrics
        .as_ref()
        .and_then(|m| m.export().ok())
        .unwrap_or_else(|| "# Metrics not enabled\n".to_string())
}

/// Create the HTTP router
pub fn create_router(state: RpcState) -> Router {
    let mut router = Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Company endpoints
        .route("/companies", post(handlers::create_company))
        .route("/companies/all", get(handlers::list_companies))
        .route("/companies/name/{name}", get(handlers::get_companies_by_name))
        .route(
            "/companies/no-representative",
            get(handlers::get_companies_without_representative),
        )
        .route(
            "/companies/{id}",
            get(handlers::get_company)
                .put(handlers::update_company)
                .delete(handlers::delete_company),
        )
        // Association endpoints
        .route(
            "/companies/{id}/representatives",
            get(handlers::list_company_representatives),
        )
        .route(
            "/companies/{id}/representatives/{representative_id}/assign",
            post(handlers::assign_representative),
        )
        .route(
            "/companies/{id}/representatives/{representative_id}/unassign",
            post(handlers::unassign_representative),
        )
        .route(
            "/companies/transfer/representative/",
            post(handlers::transfer_representative),
        )
        // Representative endpoints
        .route("/representatives", post(handlers::create_representative))
        .route("/representatives/all", get(handlers::list_representatives))
        .route(
            "/representatives/name",
            get(handlers::find_representatives_by_name),
        )
        .route(
            "/representatives/{id}",
            get(handlers::get_representative)
                .put(handlers::update_representative)
                .delete(handlers::delete_representative),
        )
        // Middleware
        .layer(from_fn_with_state(state.clone(), track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    if let Some(limiter) = state.rate_limiter.clone() {
        router = router.layer(from_fn(move |request: Request, next: Next| {
            rate_limit_middleware(limiter.clone(), request, next)
        }));
    }
    router = router.layer(from_fn(timeout_middleware));

    router.with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: RpcState, addr: &str) -> Result<(), ApiError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::Server(e.to_string()))?;

    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| ApiError::Server(e.to_string()))?;

    Ok(())
}

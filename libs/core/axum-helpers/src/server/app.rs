use super::shutdown::ShutdownCoordinator;
use crate::errors::not_found;
use crate::http::{cors_layer, parse_allowed_origins, security_headers};
use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
};
use core_config::{env_required, server::ServerConfig};
use std::future::Future;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Wrap API routes with the shared middleware stack.
///
/// Routes are nested under `/api`. Unmatched paths get the JSON 404 body.
/// `CORS_ALLOWED_ORIGIN` (comma-separated) is required.
pub fn create_router(apis: Router, config: &ServerConfig) -> io::Result<Router> {
    let raw = env_required("CORS_ALLOWED_ORIGIN")
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let origins = parse_allowed_origins(&raw)?;

    info!(origins = %raw, "CORS configured");
    Ok(create_router_with_origins(apis, config, origins))
}

/// [`create_router`] with an explicit origin list
pub fn create_router_with_origins(
    apis: Router,
    config: &ServerConfig,
    origins: Vec<HeaderValue>,
) -> Router {
    Router::new()
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(origins))
        .layer(CompressionLayer::new())
}

/// Serve until SIGINT/SIGTERM, then drain in-flight requests and run
/// `cleanup`, bounded by `config.shutdown_timeout`.
pub async fn serve<F>(router: Router, config: &ServerConfig, cleanup: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    info!(address = %listener.local_addr()?, "Server listening");

    let signal_watcher = coordinator.clone();
    tokio::spawn(async move {
        signal_watcher.wait_for_signal().await;
    });

    let shutdown_timeout = config.shutdown_timeout;
    let mut cleanup_rx = coordinator.subscribe();
    let cleanup_handle = tokio::spawn(async move {
        let _ = cleanup_rx.recv().await;
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed"),
            Err(_) => tracing::warn!(?shutdown_timeout, "Cleanup timed out, forcing shutdown"),
        }
    });

    let mut shutdown_rx = coordinator.subscribe();
    let result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server error"));

    // make sure cleanup runs when the server stopped for another reason
    coordinator.shutdown();
    let _ = cleanup_handle.await;

    result
}

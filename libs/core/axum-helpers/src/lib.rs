//! # Axum Helpers
//!
//! Shared HTTP plumbing for the API binaries.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: `AppError` and the JSON error envelope
//! - **[`extractors`]**: UUID path, query map and validated JSON extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_router, health_router, serve};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let config = ServerConfig::default();
//! let app = create_router(api_routes, &config)?.merge(health_router(app_info!()));
//! serve(app, &config, async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{QueryParams, UuidPath, ValidatedJson};
pub use http::{cors_layer, parse_allowed_origins, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_router,
    create_router_with_origins, health_router, run_health_checks, serve, shutdown_signal,
};

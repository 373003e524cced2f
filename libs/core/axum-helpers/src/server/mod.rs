//! Router assembly, health endpoints and graceful shutdown.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, create_router_with_origins, serve};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};

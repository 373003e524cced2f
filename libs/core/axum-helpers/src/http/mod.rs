//! HTTP middleware: CORS and security headers.

pub mod cors;
pub mod security;

pub use cors::{cors_layer, parse_allowed_origins};
pub use security::security_headers;

use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Parse a comma-separated origin list such as
/// `http://localhost:3000,https://app.example.com`.
pub fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS origin '{}': {}", s, e),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(origins)
}

/// CORS for the profile API: listed origins, JSON methods, 1 hour preflight cache
pub fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins() {
        let origins = parse_allowed_origins("http://localhost:3000, https://app.example.com,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://app.example.com");
    }

    #[test]
    fn test_parse_allowed_origins_empty() {
        let err = parse_allowed_origins(" , ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_parse_allowed_origins_invalid() {
        let err = parse_allowed_origins("http://ok.example.com,bad\norigin").unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"));
    }
}

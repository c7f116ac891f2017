use axum::http::{HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer restricted to the given origins.
///
/// Allows the methods the REST API uses and JSON request headers; preflight
/// responses are cached for an hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build a layer from a comma-separated origin list.
///
/// `None` or a list with no entries yields the permissive layer.
pub fn cors_layer_from_origins(origins: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    let parsed = parse_origins(origins.unwrap_or_default())?;
    if parsed.is_empty() {
        tracing::info!("CORS allows any origin");
        return Ok(create_permissive_cors_layer());
    }
    tracing::info!(origins = parsed.len(), "CORS restricted to configured origins");
    Ok(create_cors_layer(parsed))
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_empty() {
        let origins = parse_origins(" http://localhost:3000 ,, https://shop.example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:3000");
        assert_eq!(origins[1], "https://shop.example.com");
    }

    #[test]
    fn test_parse_origins_rejects_invalid_header() {
        assert!(parse_origins("http://bad\norigin").is_err());
    }

    #[test]
    fn test_layer_from_origins() {
        assert!(cors_layer_from_origins(None).is_ok());
        assert!(cors_layer_from_origins(Some("")).is_ok());
        assert!(cors_layer_from_origins(Some("http://localhost:5173")).is_ok());
    }
}

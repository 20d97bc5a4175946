//! HTTP middleware configured from [`ApiConfig`].
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. CORS (browser storefront origin)
//! 3. Request ID (set, then propagated to the response)
//! 4. `TraceLayer` (request tracing)

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::config::{ApiConfig, ConfigError};

/// CORS policy letting the configured storefront origin call the API.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the origin is not a valid header value.
pub fn cors_layer(config: &ApiConfig) -> Result<CorsLayer, ConfigError> {
    let origin = HeaderValue::from_str(&config.cors_origin).map_err(|e| {
        ConfigError::InvalidEnvVar("VIBE_CORS_ORIGIN".to_string(), e.to_string())
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

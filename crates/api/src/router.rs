//! Application router shared by the binary and the integration tests.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{ConfigError, ServerConfig};
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// `/health` at the root, everything else under `/api/v1`, wrapped in the
/// middleware stack.
///
/// Layers run outermost first on a request: CORS, request id assignment,
/// tracing, request id propagation, timeout, panic recovery.
pub fn build_app_router(state: AppState) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&state.config)?;
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let routes = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes());

    Ok(routes
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
        .with_state(state))
}

/// CORS for the configured front-end origins. An origin that is not a
/// valid header value is a configuration error, and so is `*`: credentials
/// are allowed, which rules out a wildcard origin.
pub fn build_cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let mut origins = Vec::with_capacity(config.cors_origins.len());
    for origin in &config.cors_origins {
        if origin == "*" {
            return Err(ConfigError::InvalidOrigin(origin.clone()));
        }
        let value = HeaderValue::from_str(origin)
            .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;
        origins.push(value);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::config::NotificationConfig;

    fn config_with_origins(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            notifications: NotificationConfig::default(),
        }
    }

    #[test]
    fn valid_origins_build() {
        let config = config_with_origins(&["http://localhost:5173", "https://events.test"]);
        assert!(build_cors_layer(&config).is_ok());
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let config = config_with_origins(&["http://bad\norigin"]);
        assert_matches!(
            build_cors_layer(&config),
            Err(ConfigError::InvalidOrigin(o)) if o.contains("bad")
        );
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        let config = config_with_origins(&["http://localhost:5173", "*"]);
        assert_matches!(
            build_cors_layer(&config),
            Err(ConfigError::InvalidOrigin(o)) if o == "*"
        );
    }
}

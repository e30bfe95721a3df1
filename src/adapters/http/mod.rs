//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.
//! [`build_app`] assembles them and adds the shared middleware stack.

pub mod coupon;
mod health;

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use coupon::{coupon_routes, CouponHandlers};
pub use health::health_routes;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware settings for the HTTP surface.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Build a router with all routes registered (no middleware)
pub fn build_router(handlers: CouponHandlers) -> Router {
    Router::new()
        .merge(coupon_routes(handlers))
        .merge(health_routes())
}

/// Build a fully configured application with all middleware
pub fn build_app(handlers: CouponHandlers, settings: &HttpSettings) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut app = build_router(handlers)
        // Timeout - abort slow requests
        .layer(TimeoutLayer::new(settings.request_timeout))
        // Trace - request spans (INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        // Request ID - generate one unless the caller sent it
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));

    if let Some(cors) = cors_layer(&settings.cors_origins) {
        app = app.layer(cors);
    }

    app
}

/// CORS is enabled only when origins are configured. Unparseable origins
/// are skipped.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ]),
    )
}

//! Middleware stack for the API server
//!
//! Request ids, tracing spans, the whole-request timeout and CORS.

use axum::{
    http::{header::HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use beacon_common::CorsConfig;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer},
};
use tracing::{info, warn, Level, Span};

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Whole-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Span per request, tagged with the request id set by the outer layer
#[derive(Debug, Clone, Copy)]
struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Answer 503 for requests on `router` that run past `REQUEST_TIMEOUT`
///
/// Applies to the routes present on `router` when called; routes merged in
/// afterwards are not bounded.
pub fn with_request_timeout<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(TimeoutLayer::with_status_code(
        StatusCode::SERVICE_UNAVAILABLE,
        REQUEST_TIMEOUT,
    ))
}

/// Wrap `router` in the shared middleware stack
///
/// Requests pass through: request id, propagation, trace, CORS.
pub fn apply_middleware(router: Router, cors: &CorsConfig, is_production: bool) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(trace_layer())
            .layer(create_cors_layer_from_config(cors, is_production)),
    )
}

/// Parse configured origins, dropping the ones that are not valid header values
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// Create CORS layer from configuration
///
/// Development without configured origins allows any origin; otherwise only
/// the configured list is allowed (an empty list blocks browsers).
fn create_cors_layer_from_config(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            request_id_header(),
        ])
        .expose_headers([request_id_header()]);

    match (is_production, config.allowed_origins.is_empty()) {
        (false, true) => {
            warn!("CORS allows any origin; set CORS_ALLOWED_ORIGINS outside development");
            layer.allow_origin(Any)
        }
        (true, true) => {
            warn!("CORS has no allowed origins in production; browser requests will be blocked");
            layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        }
        (_, false) => {
            let origins = parse_origins(&config.allowed_origins);
            info!(count = origins.len(), "CORS restricted to configured origins");
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}

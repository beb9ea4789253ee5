//! HTTP middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::state::AppState;

/// Request logging middleware, also counts requests for `/metrics`
pub async fn request_logger(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    state.metrics.record_request();
    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        info!("{} {} {} in {:?}", method, uri, status, duration);
    } else {
        warn!("{} {} {} in {:?}", method, uri, status, duration);
    }

    response
}

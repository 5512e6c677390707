//! Transport-level layers wrapped around the whole app.
//!
//! Order, outermost first: request id (set, then echoed back), error rendering,
//! timeout, access log. Rendered layer errors therefore still carry `x-request-id`.
//!
//! The body limit is `DefaultBodyLimit`: it is enforced where the body is read, so an
//! oversized body fails inside `JsonBody` and renders like any other error.
//!
//! A timeout drops the handler future, which also cancels any in-flight database call.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::header::HeaderName;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct HttpLimits {
    pub timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

pub fn apply(router: Router, limits: HttpLimits) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(HandleErrorLayer::new(render_layer_error))
            .layer(DefaultBodyLimit::max(limits.body_limit_bytes))
            .layer(TimeoutLayer::new(limits.timeout))
            .layer(TraceLayer::new_for_http()),
    )
}

// Layer failures get the same JSON error body as handler failures.
async fn render_layer_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        AppError::Timeout
    } else {
        AppError::internal(anyhow::anyhow!("middleware error: {err}"))
    }
}

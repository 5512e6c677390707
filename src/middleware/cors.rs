//! CORS policy for browser clients.
//!
//! The access token rides in a cookie, so browsers only send it when the response
//! allows credentials. Credentials rule out a wildcard origin; instead:
//! - Development: mirror the request origin.
//! - Production: exact-match allowlist from Config. An empty list allows no origin.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    router.layer(
        CorsLayer::new()
            .allow_origin(origin_policy(config))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, request_id.clone()])
            .expose_headers([request_id])
            .max_age(Duration::from_secs(600)),
    )
}

fn origin_policy(config: &Config) -> AllowOrigin {
    if !config.app_env.is_production() {
        return AllowOrigin::mirror_request();
    }

    // Unparsable entries can never match a real Origin header.
    let allowlist: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    AllowOrigin::predicate(move |origin, _parts| allowlist.contains(origin))
}

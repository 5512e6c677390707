#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use user_profile_service::{
    app,
    middleware::http::{self, HttpLimits},
    repos::InMemoryProfileRepo,
    services::auth::{TokenVerifier, VerifierOptions},
    state::AppState,
    validation::ProfileRules,
};

pub const PUBLIC_PEM: &str = include_str!("../fixtures/access_public.pem");
pub const PRIVATE_PEM: &str = include_str!("../fixtures/access_private.pem");
pub const FOREIGN_PRIVATE_PEM: &str = include_str!("../fixtures/foreign_private.pem");

pub const PROFILE_PATH: &str = "/api/v1/user-profile/";

pub fn test_app() -> Router {
    let verifier = TokenVerifier::new(PUBLIC_PEM, VerifierOptions::default())
        .expect("fixture public key parses");
    let state = AppState::new(
        Arc::new(InMemoryProfileRepo::new()),
        Arc::new(verifier),
        ProfileRules::new(),
        "access_token",
    );
    app::build_api(state)
}

/// `test_app` wrapped in the transport layers (request id, body limit, timeout).
pub fn test_app_with_limits(limits: HttpLimits) -> Router {
    http::apply(test_app(), limits)
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn sign_rs256(private_pem: &str, claims: &Value) -> String {
    let key =
        EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("fixture private key parses");
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).expect("token signs")
}

/// Valid access token for `user_id`, good for ten minutes.
pub fn token_for(user_id: Uuid) -> String {
    sign_rs256(
        PRIVATE_PEM,
        &json!({ "sub": user_id.to_string(), "exp": now() + 600 }),
    )
}

pub fn expired_token_for(user_id: Uuid) -> String {
    sign_rs256(
        PRIVATE_PEM,
        &json!({ "sub": user_id.to_string(), "exp": now() - 3600 }),
    )
}

pub fn foreign_token_for(user_id: Uuid) -> String {
    sign_rs256(
        FOREIGN_PRIVATE_PEM,
        &json!({ "sub": user_id.to_string(), "exp": now() + 600 }),
    )
}

/// HS256 token keyed with the public key PEM: the classic algorithm-substitution forgery.
pub fn hmac_forged_token_for(user_id: Uuid) -> String {
    let key = EncodingKey::from_secret(PUBLIC_PEM.as_bytes());
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({ "sub": user_id.to_string(), "exp": now() + 600 }),
        &key,
    )
    .expect("token signs")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("theme=dark; access_token={token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    dispatch(app, req).await
}

/// Runs a prebuilt request. An empty response body reads as `Value::Null`.
pub async fn dispatch(app: &Router, req: Request<Body>) -> Result<TestResponse> {
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(TestResponse {
        status,
        headers,
        body,
    })
}

/// Like `send`, but with an arbitrary (possibly malformed) JSON body.
pub async fn send_raw(
    app: &Router,
    method: Method,
    path: &str,
    token: &str,
    raw: &str,
) -> Result<TestResponse> {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .header(header::COOKIE, format!("access_token={token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))?;

    dispatch(app, req).await
}

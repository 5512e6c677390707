//! Access token (cookie JWT) verification -> AuthCtx in request extensions
//!
//! - The token is read from the auth cookie only; there is no header fallback.
//! - A missing cookie is rejected exactly like a bad token, so clients cannot tell
//!   "no credential" from "forged credential".
//! - On any failure the request stops here; handlers never run.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Puts every route of `router` behind the auth gate.
///
/// Example:
/// ```ignore
/// let protected = Router::new().route("/user-profile", get(get_profile));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths still fall through to a plain 404
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = cookie_value(req.headers(), &state.auth_cookie).ok_or_else(|| {
        tracing::debug!(cookie = %state.auth_cookie, "auth cookie missing");
        AppError::TokenInvalid
    })?;

    let identity = match state.verifier.verify(token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                expired = err.is_expired(),
                error = %err,
                "access token verification failed"
            );
            return Err(err.into());
        }
    };

    // middleware -> extractor hand-off
    req.extensions_mut().insert(AuthCtx::authenticated(identity));

    Ok(next.run(req).await)
}

/// Finds cookie `name` across all `Cookie` headers. Empty values count as absent.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&'static str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for v in values {
            map.append(header::COOKIE, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn finds_named_cookie_among_others() {
        let h = headers(&["theme=dark; access_token=abc.def.ghi; lang=nb"]);
        assert_eq!(cookie_value(&h, "access_token"), Some("abc.def.ghi"));
    }

    #[test]
    fn searches_every_cookie_header() {
        let h = headers(&["theme=dark", "access_token=tok"]);
        assert_eq!(cookie_value(&h, "access_token"), Some("tok"));
    }

    #[test]
    fn strips_quotes() {
        let h = headers(&["access_token=\"tok\""]);
        assert_eq!(cookie_value(&h, "access_token"), Some("tok"));
    }

    #[test]
    fn absent_or_empty_cookie_is_none() {
        assert_eq!(cookie_value(&HeaderMap::new(), "access_token"), None);
        assert_eq!(cookie_value(&headers(&["access_token="]), "access_token"), None);
        assert_eq!(
            cookie_value(&headers(&["my_access_token=tok"]), "access_token"),
            None
        );
    }
}

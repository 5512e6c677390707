use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Identity;
use crate::state::AppState;

use super::AuthCtx;

/// Extractor that hands the verified caller to a handler.
///
/// Relies on the auth gate having inserted `AuthCtx` into the request extensions.
/// A missing context (route not behind the gate) is `Unauthorized`; a nil user id
/// is `InvalidIdentity`. Handlers never see a zero-value identity.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<AuthCtx>()
            .and_then(AuthCtx::identity)
            .ok_or_else(|| {
                tracing::error!("auth context missing; is the route behind the auth gate?");
                AppError::Unauthorized
            })?;

        if identity.user_id.is_nil() {
            return Err(AppError::InvalidIdentity);
        }

        Ok(CurrentUser(identity.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::repos::InMemoryProfileRepo;
    use crate::services::auth::{TokenVerifier, VerifierOptions};
    use crate::validation::ProfileRules;

    fn state() -> AppState {
        let verifier = TokenVerifier::new(
            include_str!("../../../../../tests/fixtures/access_public.pem"),
            VerifierOptions::default(),
        )
        .unwrap();
        AppState::new(
            Arc::new(InMemoryProfileRepo::new()),
            Arc::new(verifier),
            ProfileRules::new(),
            "access_token",
        )
    }

    async fn extract(ctx: Option<AuthCtx>) -> Result<CurrentUser, AppError> {
        let (mut parts, _) = Request::new(()).into_parts();
        if let Some(ctx) = ctx {
            parts.extensions.insert(ctx);
        }
        CurrentUser::from_request_parts(&mut parts, &state()).await
    }

    #[tokio::test]
    async fn returns_identity_set_by_the_gate() {
        let user_id = Uuid::new_v4();
        let ctx = AuthCtx::authenticated(Identity::new(user_id));

        let CurrentUser(identity) = extract(Some(ctx)).await.unwrap();
        assert_eq!(identity.user_id, user_id);
    }

    #[tokio::test]
    async fn missing_context_is_unauthorized() {
        assert!(matches!(extract(None).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn empty_context_is_unauthorized() {
        let res = extract(Some(AuthCtx::default())).await;
        assert!(matches!(res, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn nil_user_id_is_invalid_identity() {
        let ctx = AuthCtx::authenticated(Identity::new(Uuid::nil()));
        assert!(matches!(
            extract(Some(ctx)).await,
            Err(AppError::InvalidIdentity)
        ));
    }
}

/*
 * Responsibility
 * - URL layout of v1
 * - /health is public; everything under /user-profile sits behind the auth gate
 * - other methods on a known path get a JSON 405 instead of axum's empty one
 */
use axum::{
    Router,
    routing::{MethodRouter, get},
};

use crate::api::v1::handlers::{
    fallback::method_not_allowed,
    health::health,
    profiles::{create_profile, delete_profile, get_profile, update_profile},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let profile: MethodRouter<AppState> = get(get_profile)
        .post(create_profile)
        .patch(update_profile)
        .delete(delete_profile)
        .fallback(method_not_allowed);

    // Clients use both spellings; serve them the same way instead of redirecting.
    let protected = Router::new()
        .route("/user-profile", profile.clone())
        .route("/user-profile/", profile);

    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .merge(access::apply(protected, state))
}

/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - profile service, token verifier, validation rules, auth cookie name
 * - Cloned per request, so everything inside is Arc / cheap to clone
 */
use std::sync::Arc;

use crate::repos::ProfileRepository;
use crate::services::{ProfileService, auth::TokenVerifier};
use crate::validation::ProfileRules;

#[derive(Clone)]
pub struct AppState {
    pub profiles: ProfileService,
    pub verifier: Arc<TokenVerifier>,
    pub rules: Arc<ProfileRules>,
    pub auth_cookie: Arc<str>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn ProfileRepository>,
        verifier: Arc<TokenVerifier>,
        rules: ProfileRules,
        auth_cookie: &str,
    ) -> Self {
        Self {
            profiles: ProfileService::new(repo),
            verifier,
            rules: Arc::new(rules),
            auth_cookie: Arc::from(auth_cookie),
        }
    }
}

/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The auth gate verifies the token and stores this in request extensions;
 *   handlers only ever receive it through the extractor
 *
 * Notes
 * - Token verification itself lives in services::auth
 */
use crate::services::auth::Identity;

/// Context attached to a request by the auth gate.
///
/// `identity` is set exactly once, by the gate, after the token verified.
#[derive(Debug, Clone, Default)]
pub struct AuthCtx {
    identity: Option<Identity>,
}

impl AuthCtx {
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

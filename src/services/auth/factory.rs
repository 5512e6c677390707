//! Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use anyhow::Context;

use crate::config::{Config, PublicKeySource};
use crate::services::auth::{TokenVerifier, VerifierOptions};

pub fn build_token_verifier(config: &Config) -> anyhow::Result<Arc<TokenVerifier>> {
    let pem = match &config.access_jwt_public_key {
        PublicKeySource::Pem(pem) => pem.clone(),
        PublicKeySource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read public key {}", path.display()))?,
    };

    let options = VerifierOptions {
        issuer: config.auth_issuer.clone(),
        audience: config.auth_audience.clone(),
        leeway_seconds: config.access_token_leeway_seconds,
    };

    let verifier = TokenVerifier::new(&pem, options).map_err(|e| {
        tracing::error!(error = %e, "failed to parse access JWT public key PEM (expected RSA)");
        anyhow::anyhow!("invalid access JWT public key: {e}")
    })?;

    Ok(Arc::new(verifier))
}

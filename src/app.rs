/*
 * Responsibility
 * - Config -> dependencies -> Router
 * - Middleware stack (HTTP limits, security headers, CORS)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::fallback::route_not_found;
use crate::config::Config;
use crate::middleware::{self, http::HttpLimits};
use crate::repos::PgProfileRepo;
use crate::services::auth::build_token_verifier;
use crate::state::AppState;
use crate::validation::ProfileRules;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,user_profile_service=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get lost.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting user profile API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    // The verifier is built first: a bad key should fail before touching the database.
    let verifier = build_token_verifier(config)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.database_acquire_timeout)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    Ok(AppState::new(
        Arc::new(PgProfileRepo::new(pool)),
        verifier,
        ProfileRules::new(),
        &config.auth_cookie_name,
    ))
}

/// Routes only, without transport middleware. Tests drive this directly.
pub fn build_api(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .fallback(route_not_found)
        .with_state(state)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = build_api(state);
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(
        router,
        HttpLimits {
            timeout: config.request_timeout,
            body_limit_bytes: config.request_body_limit_bytes,
        },
    )
}

//! Per-user profile API: cookie-authenticated CRUD over a Postgres-backed store.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
pub mod validation;

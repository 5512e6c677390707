/*
 * Responsibility
 * - AppError: every failure a request can end with
 * - IntoResponse: the one place failures become HTTP status + JSON error body
 * - RepoError / TokenError / ValidationErrors convert in via From
 */
use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::TokenError;
use crate::validation::ValidationErrors;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<&'static str, String>>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid user id")]
    InvalidIdentity,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("user profile already exists")]
    ProfileConflict,
    #[error("error create user-profile")]
    ProfileCreate,
    #[error("error update user-profile")]
    ProfileUpdate,
    #[error("error delete user-profile")]
    ProfileDelete,
    #[error("token has expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("invalid request body")]
    InvalidBody,
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("no such route")]
    RouteNotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("request timed out")]
    Timeout,
    #[error("internal server error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Status and client-facing message for each kind.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::InvalidIdentity => (StatusCode::BAD_REQUEST, "Invalid UserId"),
            AppError::ProfileNotFound => (StatusCode::NOT_FOUND, "Profile not found"),
            AppError::ProfileConflict => (StatusCode::BAD_REQUEST, "Profile already exists"),
            AppError::ProfileCreate => (StatusCode::BAD_REQUEST, "User profile is invalid"),
            AppError::ProfileUpdate => (StatusCode::BAD_REQUEST, "Error update User Profile"),
            AppError::ProfileDelete => (StatusCode::NOT_FOUND, "Error delete User Profile"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token is expired"),
            AppError::TokenInvalid => (StatusCode::UNAUTHORIZED, "Token is invalid"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request body"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"),
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, "Not found"),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, "Request timeout"),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Full detail stays in the server log; the client only gets `message`.
        if let AppError::Internal(err) = &self {
            tracing::error!(error = ?err, "unhandled server error");
        }

        let fields = match &self {
            AppError::Validation(errors) => Some(errors.to_field_map()),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: status.as_u16(),
                message,
                fields,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::ProfileConflict,
            RepoError::NotFound => AppError::ProfileNotFound,
            RepoError::CreateFailed(_) => AppError::ProfileCreate,
            RepoError::UpdateFailed(_) => AppError::ProfileUpdate,
            RepoError::DeleteFailed(_) => AppError::ProfileDelete,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        if e.is_expired() {
            AppError::TokenExpired
        } else {
            AppError::TokenInvalid
        }
    }
}

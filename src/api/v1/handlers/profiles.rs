/*
 * Responsibility
 * - /user-profile handlers (the caller's own profile only)
 * - identity comes from CurrentUser, never from the body or path
 * - DTO validation -> service call; failures flow out as AppError
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::profiles::{
            CreateProfileRequest, ProfileIdResponse, ProfileResponse, StatusResponse,
            UpdateProfileRequest,
        },
        extractors::{CurrentUser, JsonBody},
    },
    error::AppError,
    repos::NewProfile,
    state::AppState,
};

pub async fn create_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    JsonBody(req): JsonBody<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileIdResponse>), AppError> {
    req.validate(&state.rules)?;

    let id = state
        .profiles
        .create(NewProfile {
            user_id: identity.user_id,
            first_name: req.first_name,
            last_name: req.last_name,
            city: req.city,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProfileIdResponse { id })))
}

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = state.profiles.get(identity.user_id).await?;
    Ok(Json(row.into()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let patch = req.into_patch(&state.rules)?;

    state.profiles.update(identity.user_id, patch).await?;

    Ok(Json(StatusResponse {
        status: StatusCode::OK.as_u16(),
        data: "Profile updated successfully",
    }))
}

// Wire status stays 200 so the body is delivered; the body carries 204.
pub async fn delete_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<StatusResponse>, AppError> {
    state.profiles.delete(identity.user_id).await?;

    Ok(Json(StatusResponse {
        status: StatusCode::NO_CONTENT.as_u16(),
        data: "Profile deleted successfully",
    }))
}

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::{AppJson, Requester},
    models::{NewUser, ProfileUpdate, UserProfile},
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub user: UserProfile,
}

/// Registers a new user profile
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<NewUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    request.validate()?;

    let user = state.users.create(request).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: Some("User registered successfully"),
            user,
        }),
    ))
}

/// Returns the requester's profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .get(requester.0)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(UserResponse {
        message: None,
        user,
    }))
}

/// Applies a partial update to the requester's profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    AppJson(request): AppJson<ProfileUpdate>,
) -> AppResult<Json<UserResponse>> {
    request.validate()?;

    let user = state
        .users
        .update(requester.0, request)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(UserResponse {
        message: Some("Profile updated"),
        user,
    }))
}

// src/handlers/auth.rs

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError, Entity},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::{LoginResponse, LoginUserPayload},
        user::User,
    },
};

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<LoginUserPayload>, AppError>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (user, token) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(LoginResponse {
        message: app_state.i18n_store.translate(&locale.0, "msg.login_ok"),
        user,
        token,
    }))
}

// GET /api/auth/me
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(current): AuthenticatedUser,
) -> Result<Json<User>, ApiError> {
    let user = app_state
        .user_repo
        .find_by_id(current.id)
        .await
        .and_then(|user| user.ok_or(AppError::NotFound(Entity::User)))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(user))
}

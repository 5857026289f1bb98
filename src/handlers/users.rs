// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError, Entity},
    config::AppState,
    handlers::{message, parse_id},
    middleware::{
        i18n::Locale,
        rbac::{AdminOnly, RequireRole},
    },
    models::user::{CreateUserPayload, UpdateUserPayload},
};

// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(users)))
}

// POST /api/users (ADMIN)
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateUserPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .create_user(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users/{id}
pub async fn get_user(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = async {
        let id = parse_id(&id, "id")?;
        app_state
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::User))
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(user)))
}

// PUT /api/users/{id} (ADMIN)
pub async fn update_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateUserPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = async {
        let id = parse_id(&id, "id")?;
        payload.validate()?;
        app_state
            .user_repo
            .update(id, payload.into())
            .await?
            .require(Entity::User)
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.user_updated", json!(outcome)))
}

// DELETE /api/users/{id} (ADMIN): exclusão lógica
pub async fn deactivate_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = async {
        let id = parse_id(&id, "id")?;
        app_state
            .user_repo
            .deactivate(id)
            .await?
            .require(Entity::User)
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(user_id = %id, "usuário desativado");
    Ok(message(&app_state, &locale, "msg.user_deactivated", json!(outcome)))
}

// src/handlers/posts.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError, Entity},
    config::AppState,
    handlers::{message, parse_id},
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::post::DEFAULT_CATEGORY,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub body: String,
    pub category: Option<String>,
}

// GET /api/posts
pub async fn list_posts(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let posts = app_state
        .post_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(posts)))
}

// POST /api/posts: o autor é quem está logado
pub async fn create_post(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(current): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePostPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let post = async {
        payload.validate()?;
        let category = payload
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_uppercase();
        let outcome = app_state
            .post_repo
            .create(&payload.title, &payload.body, &category, current.id)
            .await?;
        let id = outcome.last_id.ok_or(AppError::NotFound(Entity::Post))?;
        app_state
            .post_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Post))
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(post)))
}

// GET /api/posts/{id}
pub async fn get_post(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = async {
        let id = parse_id(&id, "id")?;
        app_state
            .post_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Post))
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(post)))
}

// DELETE /api/posts/{id}: autor ou ADMIN
pub async fn delete_post(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(current): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = async {
        let id = parse_id(&id, "id")?;
        let author = app_state
            .post_repo
            .author_of(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Post))?;

        if author != current.id && !current.is_admin() {
            return Err(AppError::Forbidden);
        }

        app_state.post_repo.delete(id).await?.require(Entity::Post)
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.post_deleted", json!(outcome)))
}

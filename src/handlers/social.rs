// src/handlers/social.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::{message, required_id},
    middleware::i18n::Locale,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPayload {
    pub property_id: Option<Uuid>,
    #[serde(default)]
    pub networks: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLogQuery {
    pub property_id: Option<String>,
}

// POST /api/social/publish
pub async fn publish(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<PublishPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let published = async {
        let property_id = payload
            .property_id
            .ok_or(AppError::MissingParameter("propertyId"))?;
        app_state
            .social_service
            .publish(property_id, &payload.networks)
            .await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::CREATED,
        message(&app_state, &locale, "msg.published", json!({ "published": published })),
    ))
}

// GET /api/social/logs?propertyId=
pub async fn list_logs(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SocialLogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = async {
        let property_id = required_id(query.property_id.as_deref(), "propertyId")?;
        app_state.social_service.list_logs(property_id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(logs)))
}

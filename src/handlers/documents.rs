// src/handlers/documents.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError, Entity},
    config::AppState,
    handlers::{message, parse_id, required_id},
    middleware::i18n::Locale,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub url: String,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListQuery {
    pub property_id: Option<String>,
}

// POST /api/documents
pub async fn add_document(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<AddDocumentPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let document = async {
        payload.validate()?;
        let property_id = payload
            .property_id
            .ok_or(AppError::MissingParameter("propertyId"))?;
        app_state
            .document_repo
            .add(&payload.name, &payload.url, payload.doc_type.as_deref(), property_id)
            .await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(document)))
}

// GET /api/documents?propertyId=
pub async fn list_documents(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<DocumentListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = async {
        let property_id = required_id(query.property_id.as_deref(), "propertyId")?;
        app_state.document_repo.list_by_property(property_id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(documents)))
}

// DELETE /api/documents/{id}
pub async fn delete_document(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = async {
        let id = parse_id(&id, "id")?;
        app_state
            .document_repo
            .delete(id)
            .await?
            .require(Entity::Document)
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.document_deleted", json!(outcome)))
}

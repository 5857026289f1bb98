// src/handlers/clients.rs

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
    common::{error::{ApiError, AppError}, serde_ext::optional_flag},
    config::AppState,
    handlers::{message, parse_id},
    middleware::i18n::Locale,
    models::client::{ClientChanges, NewClient},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,
    pub dni_ruc: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub is_owner: Option<bool>,
    pub notes: Option<String>,
}

impl From<CreateClientPayload> for NewClient {
    fn from(payload: CreateClientPayload) -> Self {
        Self {
            full_name: payload.full_name,
            dni_ruc: payload.dni_ruc,
            phone: payload.phone,
            email: payload.email,
            is_owner: payload.is_owner.unwrap_or(true),
            notes: payload.notes,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: Option<String>,
    pub dni_ruc: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub is_owner: Option<bool>,
    pub notes: Option<String>,
}

impl From<UpdateClientPayload> for ClientChanges {
    fn from(payload: UpdateClientPayload) -> Self {
        Self {
            full_name: payload.full_name,
            dni_ruc: payload.dni_ruc,
            phone: payload.phone,
            email: payload.email,
            is_owner: payload.is_owner,
            notes: payload.notes,
        }
    }
}

// GET /api/clients
pub async fn list_clients(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let clients = app_state
        .client_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(clients)))
}

// POST /api/clients
pub async fn create_client(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateClientPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let client = async {
        payload.validate()?;
        app_state.client_service.create(payload.into()).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients/{id}
pub async fn get_client(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let client = async {
        let id = parse_id(&id, "id")?;
        app_state.client_service.get(id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(client)))
}

// PUT /api/clients/{id}
pub async fn update_client(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateClientPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = async {
        let id = parse_id(&id, "id")?;
        payload.validate()?;
        app_state.client_service.update(id, payload.into()).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.client_updated", json!(outcome)))
}

// DELETE /api/clients/{id}: recusado se o cliente for dono de algum imóvel
pub async fn delete_client(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = async {
        let id = parse_id(&id, "id")?;
        app_state.client_service.delete(id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.client_deleted", json!(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_owner_defaults_to_true_and_accepts_integers() {
        let payload: CreateClientPayload =
            serde_json::from_value(json!({ "fullName": "Ana" })).unwrap();
        assert!(NewClient::from(payload).is_owner);

        let payload: CreateClientPayload =
            serde_json::from_value(json!({ "fullName": "Ana", "isOwner": 0 })).unwrap();
        assert!(!NewClient::from(payload).is_owner);
    }

    #[test]
    fn full_name_is_required() {
        let payload: CreateClientPayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.validate().is_err());
    }
}

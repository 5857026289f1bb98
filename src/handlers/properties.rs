// src/handlers/properties.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::{ApiError, AppError}, serde_ext::optional_flag},
    config::AppState,
    handlers::{message, parse_id, validate_not_negative, validate_percentage},
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::property::{
        NewProperty, PropertyChanges, PropertyFilters, PropertyOperation, PropertyStatus,
    },
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub status: Option<String>,
    pub agent_id: Option<String>,
}

impl PropertyListQuery {
    fn into_filters(self) -> Result<PropertyFilters, AppError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<PropertyStatus>()?),
        };
        let agent_id = match self.agent_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_id(raw, "agentId")?),
        };
        Ok(PropertyFilters { status, agent_id })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    #[validate(custom(function = "validate_percentage"))]
    pub commission_pct: Option<Decimal>,
    pub operation: Option<PropertyOperation>,
    // Sem agentId, o imóvel fica com quem está cadastrando
    pub agent_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub is_exclusive: Option<bool>,
}

impl CreatePropertyPayload {
    fn into_new_property(self, caller: Uuid) -> Result<NewProperty, AppError> {
        Ok(NewProperty {
            price: self.price.ok_or(AppError::MissingParameter("price"))?,
            operation: self.operation.ok_or(AppError::MissingParameter("operation"))?,
            agent_id: self.agent_id.unwrap_or(caller),
            title: self.title,
            description: self.description,
            address: self.address,
            city: self.city,
            currency: self.currency,
            commission_pct: self.commission_pct,
            owner_id: self.owner_id,
            is_exclusive: self.is_exclusive,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyPayload {
    #[validate(length(min = 1, message = "required"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,
    pub status: Option<PropertyStatus>,
    #[validate(custom(function = "validate_percentage"))]
    pub commission_pct: Option<Decimal>,
}

impl From<UpdatePropertyPayload> for PropertyChanges {
    fn from(payload: UpdatePropertyPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            price: payload.price,
            status: payload.status,
            commission_pct: payload.commission_pct,
        }
    }
}

// =============================================================================
//  HANDLERS
// =============================================================================

// GET /api/properties?status=&agentId=
pub async fn list_properties(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<PropertyListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let properties = async {
        let filters = query.into_filters()?;
        app_state.property_service.list(filters).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(properties)))
}

// POST /api/properties
pub async fn create_property(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(current): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePropertyPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let property = async {
        payload.validate()?;
        let new_property = payload.into_new_property(current.id)?;
        app_state.property_service.create(new_property).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(property)))
}

// GET /api/properties/{id}
pub async fn get_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = async {
        let id = parse_id(&id, "id")?;
        app_state.property_service.get_detail(id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/properties/{id}
pub async fn update_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdatePropertyPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = async {
        let id = parse_id(&id, "id")?;
        payload.validate()?;
        app_state.property_service.update(id, payload.into()).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.property_updated", json!(outcome)))
}

// DELETE /api/properties/{id}: documentos e vendas vão junto
pub async fn delete_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deletion = async {
        let id = parse_id(&id, "id")?;
        app_state.property_service.delete(id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.property_deleted", json!(deletion)))
}

// GET /api/properties/{id}/contract-data
pub async fn get_contract_data(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let data = async {
        let id = parse_id(&id, "id")?;
        app_state.contract_service.contract_data(id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(data)))
}

// GET /api/properties/{id}/contract.pdf
pub async fn get_contract_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (id, pdf) = async {
        let id = parse_id(&id, "id")?;
        let pdf = app_state.contract_service.contract_pdf(id).await?;
        Ok::<_, AppError>((id, pdf))
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let disposition = format!("inline; filename=\"contrato-{}.pdf\"", id.simple());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_rejects_unknown_status() {
        let query = PropertyListQuery { status: Some("VENDIDA".into()), agent_id: None };
        assert!(matches!(query.into_filters(), Err(AppError::InvalidParameter("status"))));
    }

    #[test]
    fn list_query_ignores_blank_filters() {
        let query = PropertyListQuery { status: Some(" ".into()), agent_id: Some("".into()) };
        let filters = query.into_filters().unwrap();
        assert!(filters.status.is_none());
        assert!(filters.agent_id.is_none());
    }

    #[test]
    fn create_payload_defaults_agent_to_caller() {
        let payload: CreatePropertyPayload = serde_json::from_value(json!({
            "title": "Depa en el centro",
            "price": 85000,
            "operation": "VENTA",
            "isExclusive": 1
        }))
        .unwrap();
        let caller = Uuid::new_v4();

        let new_property = payload.into_new_property(caller).unwrap();
        assert_eq!(new_property.agent_id, caller);
        assert_eq!(new_property.is_exclusive, Some(true));
        assert_eq!(new_property.operation, PropertyOperation::Venta);
    }

    #[test]
    fn create_payload_requires_price_and_operation() {
        let payload: CreatePropertyPayload =
            serde_json::from_value(json!({ "title": "Terreno", "operation": "VENTA" })).unwrap();
        assert!(matches!(
            payload.into_new_property(Uuid::nil()),
            Err(AppError::MissingParameter("price"))
        ));
    }

    #[test]
    fn negative_price_fails_validation() {
        let payload: UpdatePropertyPayload =
            serde_json::from_value(json!({ "price": -10 })).unwrap();
        assert!(payload.validate().is_err());
    }
}

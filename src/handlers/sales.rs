// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
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
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{AdminOnly, RequireRole},
    },
    models::sale::{NewSale, SaleStatus},
    services::sale_service::parse_report_range,
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSalePayload {
    pub property_id: Option<Uuid>,
    #[validate(custom(function = "validate_not_negative"))]
    pub final_price: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub total_commission: Option<Decimal>,
    pub listing_agent_id: Option<Uuid>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub is_shared: Option<bool>,
    pub external_agency: Option<String>,
    #[validate(custom(function = "validate_percentage"))]
    pub shared_pct: Option<Decimal>,
    pub selling_agent_id: Option<Uuid>,
}

impl TryFrom<RegisterSalePayload> for NewSale {
    type Error = AppError;

    fn try_from(payload: RegisterSalePayload) -> Result<Self, Self::Error> {
        Ok(NewSale {
            property_id: payload.property_id.ok_or(AppError::MissingParameter("propertyId"))?,
            final_price: payload.final_price.ok_or(AppError::MissingParameter("finalPrice"))?,
            total_commission: payload
                .total_commission
                .ok_or(AppError::MissingParameter("totalCommission"))?,
            listing_agent_id: payload
                .listing_agent_id
                .ok_or(AppError::MissingParameter("listingAgentId"))?,
            is_shared: payload.is_shared,
            external_agency: payload.external_agency,
            shared_pct: payload.shared_pct,
            selling_agent_id: payload.selling_agent_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SaleListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/sales
pub async fn register_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterSalePayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = async {
        payload.validate()?;
        let new_sale = NewSale::try_from(payload)?;
        app_state.sale_service.register(new_sale).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales?status=
pub async fn list_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SaleListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = async {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<SaleStatus>()?),
        };
        app_state.sale_service.list(status).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
pub async fn get_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = async {
        let id = parse_id(&id, "id")?;
        app_state.sale_service.get(id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sale)))
}

// PUT /api/sales/{id}/approve (ADMIN)
pub async fn approve_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = async {
        let id = parse_id(&id, "id")?;
        app_state.sale_service.approve(id, current.id).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(message(&app_state, &locale, "msg.sale_approved", json!({ "sale": sale })))
}

// GET /api/reports/sales?startDate=&endDate=
pub async fn sales_report(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = async {
        // Datas validadas antes de qualquer acesso ao banco
        let (start, end) =
            parse_report_range(query.start_date.as_deref(), query.end_date.as_deref())?;
        app_state.sale_service.report(start, end).await
    }
    .await
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_are_named_in_the_error() {
        let payload: RegisterSalePayload = serde_json::from_value(json!({
            "propertyId": Uuid::nil(),
            "finalPrice": 120000,
            "totalCommission": 3600
        }))
        .unwrap();

        assert!(matches!(
            NewSale::try_from(payload),
            Err(AppError::MissingParameter("listingAgentId"))
        ));
    }

    #[test]
    fn shared_pct_must_be_a_percentage() {
        let payload: RegisterSalePayload =
            serde_json::from_value(json!({ "sharedPct": 150 })).unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("shared_pct"));
    }
}

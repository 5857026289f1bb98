// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use crate::common::error::AppError;

// Ciclo de vida da venda: PENDIENTE -> APROBADO (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sale_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SaleStatus {
    Pendiente,
    Aprobado,
}

impl SaleStatus {
    /// Única transição existente. Não há rejeição nem volta.
    pub fn approve(self) -> Result<SaleStatus, AppError> {
        match self {
            SaleStatus::Pendiente => Ok(SaleStatus::Aprobado),
            SaleStatus::Aprobado => Err(AppError::SaleAlreadyApproved),
        }
    }
}

impl FromStr for SaleStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDIENTE" => Ok(SaleStatus::Pendiente),
            "APROBADO" => Ok(SaleStatus::Aprobado),
            _ => Err(AppError::InvalidParameter("status")),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub property_id: Uuid,
    pub final_price: Decimal,
    pub total_commission: Decimal,
    pub listing_agent_id: Uuid,
    pub is_shared: bool,
    pub external_agency: Option<String>,
    pub shared_pct: Decimal,
    pub selling_agent_id: Option<Uuid>,
    pub status: SaleStatus,
    pub closed_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewSale {
    pub property_id: Uuid,
    pub final_price: Decimal,
    pub total_commission: Decimal,
    pub listing_agent_id: Uuid,
    pub is_shared: Option<bool>,
    pub external_agency: Option<String>,
    pub shared_pct: Option<Decimal>,
    pub selling_agent_id: Option<Uuid>,
}

// Linha de sp_report_sales
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleReportRow {
    pub sale_id: Uuid,
    pub property_id: Uuid,
    pub property_title: String,
    pub final_price: Decimal,
    pub total_commission: Decimal,
    pub listing_agent_name: String,
    pub selling_agent_name: Option<String>,
    pub is_shared: bool,
    pub external_agency: Option<String>,
    pub shared_pct: Decimal,
    pub status: SaleStatus,
    pub closed_at: DateTime<Utc>,
}

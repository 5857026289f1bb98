// src/models/property.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::document::Document;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "property_operation", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyOperation {
    Venta,
    Alquiler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "property_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyStatus {
    Disponible,
    Reservado,
    Vendido,
    Alquilado,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 4] = [
        PropertyStatus::Disponible,
        PropertyStatus::Reservado,
        PropertyStatus::Vendido,
        PropertyStatus::Alquilado,
    ];

    /// Regras para mudança manual de status (PUT /properties/{id}).
    ///
    /// VENDIDO só é alcançado pela aprovação de uma venda, e um imóvel vendido
    /// não volta para outro status por edição.
    pub fn check_manual_change(self, to: PropertyStatus) -> Result<(), AppError> {
        if self == to {
            return Ok(());
        }
        if to == PropertyStatus::Vendido || self == PropertyStatus::Vendido {
            return Err(AppError::StatusLocked);
        }
        Ok(())
    }
}

impl FromStr for PropertyStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DISPONIBLE" => Ok(PropertyStatus::Disponible),
            "RESERVADO" => Ok(PropertyStatus::Reservado),
            "VENDIDO" => Ok(PropertyStatus::Vendido),
            "ALQUILADO" => Ok(PropertyStatus::Alquilado),
            _ => Err(AppError::InvalidParameter("status")),
        }
    }
}

// --- IMÓVEL ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub price: Decimal,
    pub currency: String,
    pub commission_pct: Decimal,
    pub operation: PropertyOperation,
    pub status: PropertyStatus,
    pub agent_id: Uuid,
    pub owner_id: Option<Uuid>,
    pub is_exclusive: bool,
    pub created_at: DateTime<Utc>,
}

// Linha de sp_property_list e do detalhe: imóvel + nomes do agente e do dono
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub agent_name: Option<String>,
    pub owner_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub listing: PropertyListing,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub price: Decimal,
    pub currency: Option<String>,
    pub commission_pct: Option<Decimal>,
    pub operation: PropertyOperation,
    pub agent_id: Uuid,
    pub owner_id: Option<Uuid>,
    pub is_exclusive: Option<bool>,
}

/// Atualização parcial: `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<PropertyStatus>,
    pub commission_pct: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyFilters {
    pub status: Option<PropertyStatus>,
    pub agent_id: Option<Uuid>,
}

/// Resultado da exclusão em cascata.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDeletion {
    pub documents_deleted: u64,
    pub sales_deleted: u64,
}

// Projeção somente leitura para geração de contratos
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContractData {
    pub property_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub price: Decimal,
    pub currency: String,
    pub commission_pct: Decimal,
    pub operation: PropertyOperation,
    pub status: PropertyStatus,
    pub is_exclusive: bool,
    pub owner_name: Option<String>,
    pub owner_dni_ruc: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub agent_name: String,
    pub agent_email: String,
    pub agent_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_is_only_reachable_through_approval() {
        assert!(matches!(
            PropertyStatus::Disponible.check_manual_change(PropertyStatus::Vendido),
            Err(AppError::StatusLocked)
        ));
        assert!(matches!(
            PropertyStatus::Vendido.check_manual_change(PropertyStatus::Disponible),
            Err(AppError::StatusLocked)
        ));
    }

    #[test]
    fn other_transitions_are_free() {
        assert!(PropertyStatus::Disponible
            .check_manual_change(PropertyStatus::Reservado)
            .is_ok());
        assert!(PropertyStatus::Reservado
            .check_manual_change(PropertyStatus::Alquilado)
            .is_ok());
        assert!(PropertyStatus::Vendido
            .check_manual_change(PropertyStatus::Vendido)
            .is_ok());
    }

    #[test]
    fn parses_status_filter() {
        assert_eq!("disponible".parse::<PropertyStatus>().unwrap(), PropertyStatus::Disponible);
        assert_eq!(" VENDIDO ".parse::<PropertyStatus>().unwrap(), PropertyStatus::Vendido);
        assert!(matches!(
            "SOLD".parse::<PropertyStatus>(),
            Err(AppError::InvalidParameter("status"))
        ));
    }

    #[test]
    fn enums_use_the_database_spelling() {
        assert_eq!(serde_json::to_value(PropertyStatus::Alquilado).unwrap(), "ALQUILADO");
        assert_eq!(serde_json::to_value(PropertyOperation::Venta).unwrap(), "VENTA");
    }
}

// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

// Cliente (proprietário ou comprador)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub full_name: String,
    pub dni_ruc: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_owner: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub full_name: String,
    pub dni_ruc: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_owner: bool,
    pub notes: Option<String>,
}

/// Atualização parcial: `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub full_name: Option<String>,
    pub dni_ruc: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_owner: Option<bool>,
    pub notes: Option<String>,
}

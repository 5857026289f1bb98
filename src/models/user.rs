// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE user_role do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Agente,
}

// Representa um usuário (agente ou administrador) vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub photo_url: Option<String>,

    // Exclusão lógica: usuários desativados continuam no banco
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Atualização parcial: `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub photo_url: Option<String>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[serde(default)]
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub photo_url: Option<String>,
}

impl From<UpdateUserPayload> for UserChanges {
    fn from(payload: UpdateUserPayload) -> Self {
        Self {
            full_name: payload.full_name,
            phone: payload.phone,
            role: payload.role,
            photo_url: payload.photo_url,
        }
    }
}

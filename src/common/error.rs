// src/common/error.rs

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

/// Entidades que podem não ser encontradas (404).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Property,
    Client,
    Document,
    Sale,
    Post,
}

impl Entity {
    fn message_key(self) -> &'static str {
        match self {
            Entity::User => "not_found.user",
            Entity::Property => "not_found.property",
            Entity::Client => "not_found.client",
            Entity::Document => "not_found.document",
            Entity::Sale => "not_found.sale",
            Entity::Post => "not_found.post",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Parâmetro obrigatório ausente: {0}")]
    MissingParameter(&'static str),

    #[error("Parâmetro inválido: {0}")]
    InvalidParameter(&'static str),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("{0:?} não encontrado")]
    NotFound(Entity),

    #[error("Cliente possui imóveis associados")]
    ClientHasProperties,

    #[error("Venda já aprovada")]
    SaleAlreadyApproved,

    #[error("Mudança de status do imóvel não permitida")]
    StatusLocked,

    #[error("Referência inválida: {0}")]
    InvalidReference(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Falha ao gerar PDF: {0}")]
    PdfError(String),
}

/// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingParameter(_)
            | AppError::InvalidParameter(_)
            | AppError::InvalidBody(_)
            | AppError::ClientHasProperties
            | AppError::SaleAlreadyApproved
            | AppError::StatusLocked
            | AppError::InvalidReference(_)
            | AppError::EmailAlreadyExists => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_)
            | AppError::FontNotFound(_)
            | AppError::PdfError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status_code();
        let lang = locale.0.as_str();

        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let (error, details) = match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                (store.translate(lang, "validation_error"), Some(Value::Object(details)))
            }
            AppError::MissingParameter(param) => {
                (store.translate_with(lang, "missing_parameter", param), None)
            }
            AppError::InvalidParameter(param) => {
                (store.translate_with(lang, "invalid_parameter", param), None)
            }
            AppError::InvalidReference(constraint) => {
                (store.translate_with(lang, "invalid_reference", &constraint), None)
            }
            other => (store.translate(lang, other.message_key()), None),
        };

        ApiError { status, error, details }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::MissingParameter(_) => "missing_parameter",
            AppError::InvalidParameter(_) => "invalid_parameter",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::NotFound(entity) => entity.message_key(),
            AppError::ClientHasProperties => "client_has_properties",
            AppError::SaleAlreadyApproved => "sale_already_approved",
            AppError::StatusLocked => "status_locked",
            AppError::InvalidReference(_) => "invalid_reference",
            AppError::EmailAlreadyExists => "email_exists",
            AppError::DatabaseError(e) if is_connection_error(e) => "db_connection",
            AppError::DatabaseError(_) => "db_statement",
            AppError::FontNotFound(_) => "font_not_found",
            AppError::PdfError(_) => "pdf_render",
            AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal",
        }
    }
}

/// Falhas para alcançar o banco, em oposição a falhas do comando em si.
fn is_connection_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}

// Usado pelas rejeições de extratores, onde não há AppState à mão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::shared())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn render(err: AppError, lang: &str) -> ApiError {
        err.to_api_error(&Locale(lang.to_string()), &I18nStore::builtin())
    }

    #[test]
    fn business_rule_violations_are_bad_requests() {
        let api = render(AppError::ClientHasProperties, "es");
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.error.contains("cliente tiene propiedades asociadas"));

        assert_eq!(render(AppError::SaleAlreadyApproved, "es").status, StatusCode::BAD_REQUEST);
        assert_eq!(render(AppError::StatusLocked, "es").status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_uses_entity_message() {
        let api = render(AppError::NotFound(Entity::Property), "es");
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Propiedad no encontrada");

        let api = render(AppError::NotFound(Entity::Sale), "en");
        assert_eq!(api.error, "Sale not found");
    }

    #[test]
    fn credentials_and_roles() {
        assert_eq!(render(AppError::InvalidCredentials, "es").status, StatusCode::UNAUTHORIZED);
        assert_eq!(render(AppError::InvalidToken, "es").status, StatusCode::UNAUTHORIZED);
        assert_eq!(render(AppError::Forbidden, "es").status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_errors_split_connection_from_statement() {
        let api = render(AppError::DatabaseError(sqlx::Error::PoolTimedOut), "es");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "No se pudo conectar a la base de datos");

        let api = render(AppError::DatabaseError(sqlx::Error::RowNotFound), "es");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "Error al ejecutar la operación en la base de datos");
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let mut errors = ValidationErrors::new();
        let mut e = ValidationError::new("email");
        e.message = Some("invalid_email".into());
        errors.add("email", e);

        let api = render(AppError::ValidationError(errors), "es");
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["email"], json!(["invalid_email"]));
    }

    #[test]
    fn missing_parameter_names_the_parameter() {
        let api = render(AppError::MissingParameter("propertyId"), "es");
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.error, "Falta propertyId");
    }
}

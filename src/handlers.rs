// src/handlers.rs

use axum::Json;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::ValidationError;

use crate::{common::error::AppError, config::AppState, middleware::i18n::Locale};

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod documents;
pub mod posts;
pub mod properties;
pub mod sales;
pub mod social;
pub mod users;

/// Ids chegam como texto para que um valor inválido vire 400 com corpo JSON.
pub(crate) fn parse_id(raw: &str, name: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidParameter(name))
}

/// Parâmetro de query obrigatório: ausente ou vazio dá "Falta {name}".
pub(crate) fn required_id(raw: Option<&str>, name: &'static str) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingParameter(name))?;
    parse_id(raw, name)
}

/// `{"message": ...}` traduzido, com campos extras opcionais.
pub(crate) fn message(app_state: &AppState, locale: &Locale, key: &str, extra: Value) -> Json<Value> {
    let mut body = json!({ "message": app_state.i18n_store.translate(&locale.0, key) });
    if let (Some(body), Value::Object(extra)) = (body.as_object_mut(), extra) {
        body.extend(extra);
    }
    Json(body)
}

pub(crate) fn validate_not_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative"));
    }
    Ok(())
}

pub(crate) fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new("out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_id_distinguishes_missing_from_invalid() {
        assert!(matches!(
            required_id(None, "propertyId"),
            Err(AppError::MissingParameter("propertyId"))
        ));
        assert!(matches!(
            required_id(Some(""), "propertyId"),
            Err(AppError::MissingParameter("propertyId"))
        ));
        assert!(matches!(
            required_id(Some("abc"), "propertyId"),
            Err(AppError::InvalidParameter("propertyId"))
        ));
        assert_eq!(required_id(Some(&Uuid::nil().to_string()), "propertyId").unwrap(), Uuid::nil());
    }

    #[test]
    fn amount_and_percentage_bounds() {
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::new(-1, 2)).is_err());
        assert!(validate_percentage(&Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_percentage(&Decimal::new(10001, 2)).is_err());
    }
}

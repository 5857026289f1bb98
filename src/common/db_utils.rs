// src/common/db_utils.rs

use serde::Serialize;
use sqlx::{
    error::BoxDynError,
    postgres::{PgArguments, PgQueryResult, PgRow},
    Arguments, Encode, Executor, FromRow, Postgres, Type,
};
use uuid::Uuid;

use crate::common::error::{AppError, Entity};

// ---
// Resultado de escrita direta (UPDATE/DELETE/INSERT ... RETURNING id)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    pub affected_rows: u64,
    pub last_id: Option<Uuid>,
}

impl WriteOutcome {
    pub fn from_result(result: PgQueryResult) -> Self {
        Self {
            affected_rows: result.rows_affected(),
            last_id: None,
        }
    }

    pub fn inserted(id: Uuid) -> Self {
        Self {
            affected_rows: 1,
            last_id: Some(id),
        }
    }

    /// Nenhuma linha afetada significa que o alvo não existe.
    pub fn require(self, entity: Entity) -> Result<Self, AppError> {
        if self.affected_rows == 0 {
            return Err(AppError::NotFound(entity));
        }
        Ok(self)
    }
}

/// Resposta genérica de uma rotina que não devolve linhas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub message: &'static str,
}

impl Acknowledgement {
    pub fn ok() -> Self {
        Self {
            message: "Operación realizada con éxito",
        }
    }
}

// ---
// Invocação de rotinas armazenadas por nome, com argumentos posicionais
// ---
pub struct Procedure {
    name: &'static str,
    args: PgArguments,
    arity: usize,
    bind_error: Option<BoxDynError>,
}

impl Procedure {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            args: PgArguments::default(),
            arity: 0,
            bind_error: None,
        }
    }

    pub fn bind<T>(mut self, value: T) -> Self
    where
        T: for<'q> Encode<'q, Postgres> + Type<Postgres>,
    {
        if self.bind_error.is_none() {
            match self.args.add(value) {
                Ok(()) => self.arity += 1,
                Err(e) => self.bind_error = Some(e),
            }
        }
        self
    }

    fn placeholders(&self) -> String {
        (1..=self.arity)
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn select_sql(&self) -> String {
        format!("SELECT * FROM {}({})", self.name, self.placeholders())
    }

    pub fn call_sql(&self) -> String {
        format!("CALL {}({})", self.name, self.placeholders())
    }

    fn into_parts(self, sql: String) -> Result<(String, PgArguments), AppError> {
        match self.bind_error {
            Some(e) => Err(AppError::DatabaseError(sqlx::Error::Encode(e))),
            None => Ok((sql, self.args)),
        }
    }

    /// Primeiro conjunto de resultados da rotina.
    pub async fn fetch_all<'e, T, E>(self, executor: E) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        E: Executor<'e, Database = Postgres>,
    {
        let name = self.name;
        let sql = self.select_sql();
        let (sql, args) = self.into_parts(sql)?;

        tracing::debug!(procedure = name, "chamando rotina");
        let rows = sqlx::query_as_with::<_, T, _>(&sql, args)
            .fetch_all(executor)
            .await
            .map_err(map_constraint_error)?;

        Ok(rows)
    }

    pub async fn fetch_one<'e, T, E>(self, executor: E) -> Result<T, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        E: Executor<'e, Database = Postgres>,
    {
        let name = self.name;
        let sql = self.select_sql();
        let (sql, args) = self.into_parts(sql)?;

        tracing::debug!(procedure = name, "chamando rotina");
        let row = sqlx::query_as_with::<_, T, _>(&sql, args)
            .fetch_one(executor)
            .await
            .map_err(map_constraint_error)?;

        Ok(row)
    }

    /// `CALL` de uma procedure sem resultado: devolve só a confirmação.
    pub async fn execute<'e, E>(self, executor: E) -> Result<Acknowledgement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name = self.name;
        let sql = self.call_sql();
        let (sql, args) = self.into_parts(sql)?;

        tracing::debug!(procedure = name, "chamando procedure");
        sqlx::query_with(&sql, args)
            .execute(executor)
            .await
            .map_err(map_constraint_error)?;

        Ok(Acknowledgement::ok())
    }
}

/// Traduz violações de chave única/estrangeira em erros de negócio (400).
pub(crate) fn map_constraint_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        let constraint = db_err.constraint().unwrap_or("desconhecida").to_string();

        if db_err.is_unique_violation() {
            return match constraint.as_str() {
                "users_email_key" => AppError::EmailAlreadyExists,
                _ => AppError::InvalidReference(constraint),
            };
        }
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidReference(constraint);
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_positional_calls() {
        let proc = Procedure::new("sp_report_sales")
            .bind("2026-01-01".to_string())
            .bind(Some(Uuid::nil()));

        assert_eq!(proc.select_sql(), "SELECT * FROM sp_report_sales($1, $2)");
        assert_eq!(proc.call_sql(), "CALL sp_report_sales($1, $2)");
    }

    #[test]
    fn routine_without_arguments() {
        assert_eq!(Procedure::new("sp_noop").select_sql(), "SELECT * FROM sp_noop()");
    }

    #[test]
    fn zero_rows_is_not_found() {
        let outcome = WriteOutcome { affected_rows: 0, last_id: None };
        assert!(matches!(
            outcome.require(Entity::Document),
            Err(AppError::NotFound(Entity::Document))
        ));

        let outcome = WriteOutcome::inserted(Uuid::nil());
        assert_eq!(outcome.require(Entity::Document).unwrap().affected_rows, 1);
    }
}

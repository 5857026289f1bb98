// src/db/document_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{Procedure, WriteOutcome},
        error::AppError,
    },
    models::document::Document,
};

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Imóvel inexistente vira AppError::InvalidReference (FK)
    pub async fn add(
        &self,
        name: &str,
        url: &str,
        doc_type: Option<&str>,
        property_id: Uuid,
    ) -> Result<Document, AppError> {
        Procedure::new("sp_document_add")
            .bind(name.to_string())
            .bind(url.to_string())
            .bind(doc_type.map(str::to_string))
            .bind(property_id)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn list_by_property(&self, property_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE property_id = $1 ORDER BY created_at DESC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn delete(&self, id: Uuid) -> Result<WriteOutcome, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(WriteOutcome::from_result(result))
    }

    pub async fn delete_by_property<'e, E>(
        &self,
        executor: E,
        property_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM documents WHERE property_id = $1")
            .bind(property_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_constraint_error, WriteOutcome},
        error::AppError,
    },
    models::client::{Client, ClientChanges, NewClient},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    pub async fn create(&self, new_client: NewClient) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (full_name, dni_ruc, phone, email, is_owner, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new_client.full_name)
        .bind(new_client.dni_ruc)
        .bind(new_client.phone)
        .bind(new_client.email)
        .bind(new_client.is_owner)
        .bind(new_client.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(client)
    }

    pub async fn update(&self, id: Uuid, changes: ClientChanges) -> Result<WriteOutcome, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET full_name = COALESCE($2, full_name),
                dni_ruc   = COALESCE($3, dni_ruc),
                phone     = COALESCE($4, phone),
                email     = COALESCE($5, email),
                is_owner  = COALESCE($6, is_owner),
                notes     = COALESCE($7, notes)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.full_name)
        .bind(changes.dni_ruc)
        .bind(changes.phone)
        .bind(changes.email)
        .bind(changes.is_owner)
        .bind(changes.notes)
        .execute(&self.pool)
        .await?;

        Ok(WriteOutcome::from_result(result))
    }

    pub async fn owns_properties<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let owns: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM properties WHERE owner_id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(owns)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<WriteOutcome, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| match map_constraint_error(e) {
                // Um imóvel criado entre a checagem e o DELETE
                AppError::InvalidReference(_) => AppError::ClientHasProperties,
                other => other,
            })?;

        Ok(WriteOutcome::from_result(result))
    }
}
